//! Student and faculty services: validation, not-found errors and in-process aggregates over the repositories.

mod faculty;
mod student;
pub use faculty::{FacultyService, EMPTY_FACULTY_LIST};
pub use student::{StudentService, GAUSS_UPPER_BOUND};
