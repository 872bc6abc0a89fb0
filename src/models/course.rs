use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Statuses a course may carry, in lifecycle order.
pub const VALID_STATUSES: [&str; 3] = ["scheduled", "in_production", "available"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl Course {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Candidate fields for create and replace. The id and timestamps are
/// always assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}

/// Treats an explicit JSON `null` like an absent field, so both fall
/// through to validation instead of failing deserialization.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CourseInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Course name is required.".to_string()));
        }
        if !VALID_STATUSES.contains(&self.status.as_str()) {
            return Err(AppError::BadRequest(format!(
                "{} is not a valid status",
                self.status
            )));
        }
        Ok(())
    }
}

/// Listing projection: the index endpoint returns id and name only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
}
