pub mod course;

pub use course::{Course, CourseInput, CourseSummary, VALID_STATUSES};
