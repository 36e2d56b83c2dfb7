use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    match database::sync_schema(&db).await {
        Ok(()) => info!("Record store schema is in sync"),
        // The store may be down at startup; operations report
        // STORE_UNAVAILABLE until it comes back.
        Err(e) => warn!("Deferred schema sync, record store unreachable: {e}"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, config };
    let app = server::build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Student result service listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
