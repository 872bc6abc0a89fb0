use std::sync::Arc;

use chrono::Utc;

use crate::db::CourseStore;
use crate::error::AppError;
use crate::models::{Course, CourseInput, CourseSummary};

/// Validates course input and drives the soft-delete lifecycle. All
/// persistence goes through the [`CourseStore`] seam.
pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: CourseInput) -> Result<Course, AppError> {
        input.validate()?;
        self.store.create(&input).await
    }

    pub async fn list(&self) -> Result<Vec<CourseSummary>, AppError> {
        self.store.list_active().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Course, AppError> {
        let course = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(id))?;

        if course.is_deleted() {
            return Err(AppError::Gone(id));
        }
        Ok(course)
    }

    /// Replaces name and status of an active course, refreshing
    /// `updated_at`. Soft-deleted courses are immutable and answer Gone.
    pub async fn replace_by_id(&self, id: i64, input: CourseInput) -> Result<(), AppError> {
        input.validate()?;
        let current = self.get_by_id(id).await?;

        let replacement = Course {
            name: input.name,
            status: input.status,
            updated_at: Utc::now().to_rfc3339(),
            ..current
        };

        if !self.store.replace_by_id(id, &replacement).await? {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }

    /// Soft delete: re-writes the record with `deleted_at` set. A second
    /// delete of the same id observes Gone from the initial fetch. The
    /// fetch and the write are not wrapped in a transaction, so two
    /// racing deletes may both pass the fetch; the later write just
    /// re-applies the tombstone with a newer timestamp.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let current = self.get_by_id(id).await?;

        let now = Utc::now().to_rfc3339();
        let tombstone = Course {
            updated_at: now.clone(),
            deleted_at: Some(now),
            ..current
        };

        if !self.store.replace_by_id(id, &tombstone).await? {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }
}
