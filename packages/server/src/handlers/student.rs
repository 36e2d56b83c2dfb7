use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::Marks;
use sea_orm::ActiveValue::Set;
use tracing::instrument;

use crate::entity::student;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::student::*;
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    post,
    path = "/",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Create a student result record",
    description = "Creates a record from roll, name, subject and the three marks fields. Percentage and result are derived server-side and never taken from the client.",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Record created", body = StudentResponse),
        (status = 400, description = "Validation error (MISSING_FIELDS, VALIDATION_ERROR, FULL_MARKS_INVALID, OBTAINED_NEGATIVE, OBTAINED_EXCEEDS_FULL)", body = ErrorBody),
        (status = 409, description = "Roll number already exists (DUPLICATE_ROLL)", body = ErrorBody),
        (status = 503, description = "Record store unreachable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(roll = ?payload.roll))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = validate_create_student(payload)?;
    let derived = new.marks.validate_and_derive()?;

    let now = chrono::Utc::now();
    let record = student::ActiveModel {
        roll: Set(new.roll),
        name: Set(new.name),
        subject: Set(new.subject),
        full: Set(new.marks.full),
        pass: Set(new.marks.pass),
        obtain: Set(new.marks.obtain),
        percentage: Set(derived.percentage),
        result: Set(derived.result),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = store::insert_unique(&state.db, record).await?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List all student result records",
    description = "Returns every record, ordered by ascending roll number.",
    responses(
        (status = 200, description = "All records", body = ListStudentsResponse),
        (status = 503, description = "Record store unreachable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<ListStudentsResponse>, AppError> {
    let records = store::list_all(&state.db).await?;

    Ok(Json(ListStudentsResponse {
        count: records.len(),
        data: records.into_iter().map(StudentResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/{roll}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a record by roll number",
    params(("roll" = i64, Path, description = "Roll number")),
    responses(
        (status = 200, description = "Record details", body = StudentResponse),
        (status = 404, description = "No record for this roll (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Record store unreachable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(roll))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(roll): Path<i64>,
) -> Result<Json<StudentResponse>, AppError> {
    let model = store::find_by_roll(&state.db, roll).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{roll}",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Update a record by roll number",
    description = "Partially updates a record — only provided fields are modified. When any of full, pass or obtain is supplied, marks validation re-runs against the merged record and percentage/result are recomputed. Roll numbers cannot be changed. An empty payload returns the current record unchanged.",
    params(("roll" = i64, Path, description = "Roll number")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Record updated", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, FULL_MARKS_INVALID, OBTAINED_NEGATIVE, OBTAINED_EXCEEDS_FULL)", body = ErrorBody),
        (status = 404, description = "No record for this roll (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Record store unreachable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(roll))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(roll): Path<i64>,
    AppJson(payload): AppJson<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    validate_update_student(&payload)?;

    let existing = store::find_by_roll(&state.db, roll).await?;
    if payload == UpdateStudentRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut changes = student::ActiveModel::default();
    if let Some(ref name) = payload.name {
        changes.name = Set(name.trim().to_string());
    }
    if let Some(ref subject) = payload.subject {
        changes.subject = Set(subject.trim().to_string());
    }

    if payload.touches_marks() {
        let stored = Marks {
            full: existing.full,
            pass: existing.pass,
            obtain: existing.obtain,
        };
        let merged = Marks::merged(&stored, payload.full, payload.pass, payload.obtain);
        let derived = merged.validate_and_derive()?;

        changes.full = Set(merged.full);
        changes.pass = Set(merged.pass);
        changes.obtain = Set(merged.obtain);
        changes.percentage = Set(derived.percentage);
        changes.result = Set(derived.result);
    }

    let model = store::merge_update(&state.db, roll, changes).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{roll}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a record by roll number",
    description = "Permanently deletes the record and returns the data it held.",
    params(("roll" = i64, Path, description = "Roll number")),
    responses(
        (status = 200, description = "Record deleted", body = StudentResponse),
        (status = 404, description = "No record for this roll (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Record store unreachable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(roll))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(roll): Path<i64>,
) -> Result<Json<StudentResponse>, AppError> {
    let model = store::delete_by_roll(&state.db, roll).await?;
    Ok(Json(model.into()))
}
