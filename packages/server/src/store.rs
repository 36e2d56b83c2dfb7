//! Record store gateway: every persistence operation on student results goes
//! through here. Functions take the connection they operate on, so callers
//! (and tests) decide which database backs them.

use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::entity::student;
use crate::error::AppError;

/// Look up a record by roll number, `None` when absent.
pub async fn try_find_by_roll<C: ConnectionTrait>(
    db: &C,
    roll: i64,
) -> Result<Option<student::Model>, AppError> {
    Ok(student::Entity::find()
        .filter(student::Column::Roll.eq(roll))
        .one(db)
        .await?)
}

/// Look up a record by roll number.
pub async fn find_by_roll<C: ConnectionTrait>(
    db: &C,
    roll: i64,
) -> Result<student::Model, AppError> {
    try_find_by_roll(db, roll)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student with roll {roll} not found")))
}

/// All records, ordered by ascending roll number.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<student::Model>, AppError> {
    Ok(student::Entity::find()
        .order_by_asc(student::Column::Roll)
        .all(db)
        .await?)
}

/// Insert a record whose roll number must not already exist.
///
/// The pre-insert existence check is a fast path for a precise message; the
/// unique index on `roll` remains the authoritative check, so losing the
/// check-then-insert race surfaces as the same duplicate-roll error.
pub async fn insert_unique<C: ConnectionTrait>(
    db: &C,
    record: student::ActiveModel,
) -> Result<student::Model, AppError> {
    if let Set(roll) = &record.roll
        && try_find_by_roll(db, *roll).await?.is_some()
    {
        return Err(AppError::DuplicateRoll(format!(
            "Student with roll {roll} already exists"
        )));
    }

    Ok(record.insert(db).await?)
}

/// Apply a partial update to the record with the given roll number.
///
/// `changes` carries only the columns to overwrite. The read-merge-write runs
/// in a transaction, so no partial write is ever visible.
pub async fn merge_update(
    db: &DatabaseConnection,
    roll: i64,
    mut changes: student::ActiveModel,
) -> Result<student::Model, AppError> {
    let txn = db.begin().await?;

    let existing = find_by_roll(&txn, roll).await?;
    changes.id = Unchanged(existing.id);
    changes.updated_at = Set(chrono::Utc::now());

    let model = changes.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

/// Delete the record with the given roll number, returning the record it held.
pub async fn delete_by_roll(
    db: &DatabaseConnection,
    roll: i64,
) -> Result<student::Model, AppError> {
    let txn = db.begin().await?;

    let existing = find_by_roll(&txn, roll).await?;
    student::Entity::delete_by_id(existing.id).exec(&txn).await?;

    txn.commit().await?;
    Ok(existing)
}
