use chrono::{DateTime, Utc};
use common::{ExamResult, Marks};
use serde::{Deserialize, Serialize};

use crate::entity::student;
use crate::error::AppError;

/// Create payload. Every field is required; they are deserialized as options
/// so presence can be checked explicitly — a numeric `0` is a present value,
/// never a missing one.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStudentRequest {
    pub roll: Option<i64>,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub full: Option<f64>,
    pub pass: Option<f64>,
    pub obtain: Option<f64>,
}

/// Update payload; any subset of the mutable fields. `roll` is accepted into
/// the struct only so its presence can be rejected explicitly.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateStudentRequest {
    pub roll: Option<i64>,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub full: Option<f64>,
    pub pass: Option<f64>,
    pub obtain: Option<f64>,
}

impl UpdateStudentRequest {
    /// True when the payload touches any marks field, which forces
    /// re-validation and re-derivation against the merged record.
    pub fn touches_marks(&self) -> bool {
        self.full.is_some() || self.pass.is_some() || self.obtain.is_some()
    }
}

/// A create request that passed presence and field validation.
#[derive(Debug)]
pub struct NewStudent {
    pub roll: i64,
    pub name: String,
    pub subject: String,
    pub marks: Marks,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentResponse {
    #[schema(example = 42)]
    pub roll: i64,
    pub name: String,
    pub subject: String,
    pub full: f64,
    pub pass: f64,
    pub obtain: f64,
    /// Derived: `obtain / full * 100`, rounded to two decimal places.
    #[schema(example = 75.0)]
    pub percentage: f64,
    pub result: ExamResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ListStudentsResponse {
    /// Number of records returned.
    #[schema(example = 3)]
    pub count: usize,
    pub data: Vec<StudentResponse>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            roll: m.roll,
            name: m.name,
            subject: m.subject,
            full: m.full,
            pass: m.pass,
            obtain: m.obtain,
            percentage: m.percentage,
            result: m.result,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Check presence of every required field, then validate the text fields.
/// Marks rules are applied by the caller via [`Marks::validate_and_derive`].
pub fn validate_create_student(req: CreateStudentRequest) -> Result<NewStudent, AppError> {
    let mut missing = Vec::new();
    if req.roll.is_none() {
        missing.push("roll");
    }
    if req.name.is_none() {
        missing.push("name");
    }
    if req.subject.is_none() {
        missing.push("subject");
    }
    if req.full.is_none() {
        missing.push("full");
    }
    if req.pass.is_none() {
        missing.push("pass");
    }
    if req.obtain.is_none() {
        missing.push("obtain");
    }

    match (req.roll, req.name, req.subject, req.full, req.pass, req.obtain) {
        (Some(roll), Some(name), Some(subject), Some(full), Some(pass), Some(obtain)) => {
            let name = non_empty(&name, "Student name")?;
            let subject = non_empty(&subject, "Subject")?;
            Ok(NewStudent {
                roll,
                name,
                subject,
                marks: Marks { full, pass, obtain },
            })
        }
        _ => Err(AppError::MissingFields(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))),
    }
}

/// Validate an update payload before merging: roll is immutable, and text
/// fields must stay non-empty when supplied.
pub fn validate_update_student(req: &UpdateStudentRequest) -> Result<(), AppError> {
    if req.roll.is_some() {
        return Err(AppError::Validation(
            "Roll number is immutable and cannot be updated".into(),
        ));
    }
    if let Some(ref name) = req.name
        && name.trim().is_empty()
    {
        return Err(AppError::Validation("Student name must not be empty".into()));
    }
    if let Some(ref subject) = req.subject
        && subject.trim().is_empty()
    {
        return Err(AppError::Validation("Subject must not be empty".into()));
    }
    Ok(())
}

fn non_empty(value: &str, what: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}
