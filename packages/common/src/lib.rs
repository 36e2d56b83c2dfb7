pub mod exam_result;
pub mod marks;

pub use exam_result::ExamResult;
pub use marks::{Derived, Marks, MarksError};
