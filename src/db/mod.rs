pub mod repository;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Course, CourseInput, CourseSummary};

pub use repository::SqliteCourseStore;

/// Persistence seam for course records. The production implementation is
/// [`SqliteCourseStore`]; tests substitute an in-memory fake.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Persists a new active course, assigning its id and timestamps,
    /// and returns the stored record.
    async fn create(&self, input: &CourseInput) -> Result<Course, AppError>;

    /// All courses with a null `deleted_at`, oldest first, projected to
    /// id and name.
    async fn list_active(&self) -> Result<Vec<CourseSummary>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;

    /// Overwrites name, status, updated_at and deleted_at of the row with
    /// the given id. Returns false when no row matched.
    async fn replace_by_id(&self, id: i64, course: &Course) -> Result<bool, AppError>;
}
