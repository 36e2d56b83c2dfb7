use common::ExamResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public identifier; immutable once the record is created.
    #[sea_orm(unique)]
    pub roll: i64,

    pub name: String,
    pub subject: String,

    pub full: f64,   // maximum achievable marks
    pub pass: f64,   // minimum marks to pass
    pub obtain: f64, // marks actually scored

    // Derived columns, recomputed whenever any marks field changes.
    pub percentage: f64,
    pub result: ExamResult,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
