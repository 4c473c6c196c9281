use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course. `owner_id` names the instructor who created it and is the sole
/// identity allowed to mutate or delete the course and its assessments.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub media_url: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub status: Option<String>,
    pub price: f64,
}

/// DTO for creating a course.
///
/// `owner_id` is accepted for wire compatibility but ignored: the owner is
/// always the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub owner_id: Option<Uuid>,
    pub media_url: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub price: f64,
}

/// DTO for replacing a course. The id must match the path; the owner is
/// never taken from the body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub media_url: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub price: f64,
}
