use thiserror::Error;

use crate::exam_result::ExamResult;

/// A violated marks rule. Each variant names exactly one rule so callers can
/// report which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarksError {
    /// Full marks must be strictly positive.
    #[error("Full marks must be greater than 0")]
    FullMarksInvalid,
    /// Obtained marks must not be negative.
    #[error("Obtained marks cannot be negative")]
    ObtainedNegative,
    /// Obtained marks must not exceed full marks.
    #[error("Obtained marks cannot exceed full marks")]
    ObtainedExceedsFull,
}

impl MarksError {
    /// Stable machine-readable code for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FullMarksInvalid => "FULL_MARKS_INVALID",
            Self::ObtainedNegative => "OBTAINED_NEGATIVE",
            Self::ObtainedExceedsFull => "OBTAINED_EXCEEDS_FULL",
        }
    }
}

/// The three raw marks values of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marks {
    /// Maximum achievable marks.
    pub full: f64,
    /// Minimum marks required to pass.
    pub pass: f64,
    /// Marks actually scored.
    pub obtain: f64,
}

/// Fields computed from validated marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    /// `obtain / full * 100`, rounded to two decimal places.
    pub percentage: f64,
    pub result: ExamResult,
}

impl Marks {
    /// Merge a partial update onto stored marks: a supplied value wins, an
    /// absent one keeps the stored value. The merged view goes through the
    /// same [`Marks::validate_and_derive`] as a freshly created record.
    pub fn merged(
        stored: &Marks,
        full: Option<f64>,
        pass: Option<f64>,
        obtain: Option<f64>,
    ) -> Marks {
        Marks {
            full: full.unwrap_or(stored.full),
            pass: pass.unwrap_or(stored.pass),
            obtain: obtain.unwrap_or(stored.obtain),
        }
    }

    /// Validate the marks and compute the derived fields.
    ///
    /// Rules are checked in order and the first violated one is reported:
    /// `full > 0`, then `obtain >= 0`, then `obtain <= full`. A pass
    /// threshold above full marks is accepted and always resolves to `Fail`.
    pub fn validate_and_derive(&self) -> Result<Derived, MarksError> {
        if self.full <= 0.0 {
            return Err(MarksError::FullMarksInvalid);
        }
        if self.obtain < 0.0 {
            return Err(MarksError::ObtainedNegative);
        }
        if self.obtain > self.full {
            return Err(MarksError::ObtainedExceedsFull);
        }

        let result = if self.obtain >= self.pass {
            ExamResult::Pass
        } else {
            ExamResult::Fail
        };

        Ok(Derived {
            percentage: round2(self.obtain / self.full * 100.0),
            result,
        })
    }
}

/// Round half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
