use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::CourseStore;
use crate::error::AppError;
use crate::models::{Course, CourseInput, CourseSummary};

pub struct SqliteCourseStore {
    db: SqlitePool,
}

impl SqliteCourseStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseStore for SqliteCourseStore {
    async fn create(&self, input: &CourseInput) -> Result<Course, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO courses (name, status, created_at, updated_at, deleted_at)
            VALUES (?1, ?2, ?3, ?4, NULL)
            "#,
        )
        .bind(&input.name)
        .bind(&input.status)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await?;

        Ok(Course {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            status: input.status.clone(),
            created_at: now.clone(),
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn list_active(&self) -> Result<Vec<CourseSummary>, AppError> {
        let summaries = sqlx::query_as::<_, CourseSummary>(
            r#"
            SELECT id, name
            FROM courses
            WHERE deleted_at IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(summaries)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, name, status, created_at, updated_at, deleted_at FROM courses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(course)
    }

    async fn replace_by_id(&self, id: i64, course: &Course) -> Result<bool, AppError> {
        let rows = sqlx::query(
            r#"
            UPDATE courses
            SET name = ?1,
                status = ?2,
                updated_at = ?3,
                deleted_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&course.name)
        .bind(&course.status)
        .bind(&course.updated_at)
        .bind(&course.deleted_at)
        .bind(id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn input(name: &str, status: &str) -> CourseInput {
        CourseInput {
            name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_course() {
        let store = SqliteCourseStore::new(setup_test_db().await);

        let course = store
            .create(&input("Intro to Go", "scheduled"))
            .await
            .expect("Failed to insert course");
        assert_eq!(course.name, "Intro to Go");
        assert_eq!(course.status, "scheduled");
        assert_eq!(course.created_at, course.updated_at);
        assert!(course.deleted_at.is_none());

        let found = store
            .find_by_id(course.id)
            .await
            .expect("Failed to fetch course")
            .expect("Course not found");
        assert_eq!(found.id, course.id);
        assert_eq!(found.name, "Intro to Go");
    }

    #[tokio::test]
    async fn test_find_unknown_id_returns_none() {
        let store = SqliteCourseStore::new(setup_test_db().await);

        let found = store.find_by_id(999).await.expect("Failed to fetch");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at() {
        let store = SqliteCourseStore::new(setup_test_db().await);

        let first = store
            .create(&input("Algorithms", "available"))
            .await
            .expect("Failed to insert");
        let second = store
            .create(&input("Databases", "scheduled"))
            .await
            .expect("Failed to insert");

        let listed = store.list_active().await.expect("Failed to list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn test_list_skips_soft_deleted() {
        let store = SqliteCourseStore::new(setup_test_db().await);

        let course = store
            .create(&input("Networking", "in_production"))
            .await
            .expect("Failed to insert");

        let mut deleted = course.clone();
        deleted.deleted_at = Some(Utc::now().to_rfc3339());
        let replaced = store
            .replace_by_id(course.id, &deleted)
            .await
            .expect("Failed to replace");
        assert!(replaced);

        let listed = store.list_active().await.expect("Failed to list");
        assert!(listed.is_empty());

        // Still reachable by id: soft delete keeps the row.
        let found = store
            .find_by_id(course.id)
            .await
            .expect("Failed to fetch")
            .expect("Course not found");
        assert!(found.deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_replace_updates_fields() {
        let store = SqliteCourseStore::new(setup_test_db().await);

        let course = store
            .create(&input("Compilers", "scheduled"))
            .await
            .expect("Failed to insert");

        let mut replacement = course.clone();
        replacement.name = "Compilers II".to_string();
        replacement.status = "available".to_string();
        replacement.updated_at = Utc::now().to_rfc3339();

        let replaced = store
            .replace_by_id(course.id, &replacement)
            .await
            .expect("Failed to replace");
        assert!(replaced);

        let found = store
            .find_by_id(course.id)
            .await
            .expect("Failed to fetch")
            .expect("Course not found");
        assert_eq!(found.name, "Compilers II");
        assert_eq!(found.status, "available");
        assert_eq!(found.created_at, course.created_at);
    }

    #[tokio::test]
    async fn test_replace_missing_id_reports_no_match() {
        let store = SqliteCourseStore::new(setup_test_db().await);

        let course = store
            .create(&input("Ghost", "scheduled"))
            .await
            .expect("Failed to insert");

        let replaced = store
            .replace_by_id(course.id + 1, &course)
            .await
            .expect("Failed to replace");
        assert!(!replaced);
    }
}
