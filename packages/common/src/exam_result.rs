#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of an examination: obtained marks measured against the pass threshold.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ExamResult {
    /// Obtained marks reached the pass threshold.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Pass"))]
    Pass,
    /// Obtained marks fell short of the pass threshold.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Fail"))]
    Fail,
}

impl ExamResult {
    /// Returns true for a passing outcome.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// All possible outcome values.
    pub const ALL: &'static [ExamResult] = &[Self::Pass, Self::Fail];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for ExamResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ExamResult {
    fn default() -> Self {
        Self::Fail
    }
}

/// Error when parsing an invalid outcome string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExamResultError {
    invalid: String,
}

impl fmt::Display for ParseExamResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid result '{}'. Valid values: {}",
            self.invalid,
            ExamResult::ALL
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseExamResultError {}

impl FromStr for ExamResult {
    type Err = ParseExamResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pass" => Ok(Self::Pass),
            "Fail" => Ok(Self::Fail),
            _ => Err(ParseExamResultError {
                invalid: s.to_string(),
            }),
        }
    }
}
