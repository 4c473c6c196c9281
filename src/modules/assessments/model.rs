use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An assessment attached to a course. `questions` holds the serialized
/// question list as authored by the front end; the API treats it as opaque.
///
/// Authorization is indirect: there is no owner field here, mutation rights
/// belong to the owner of the referenced course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Assessment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub questions: String,
    pub max_score: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAssessmentDto {
    pub course_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    pub questions: String,
    #[validate(range(min = 0))]
    pub max_score: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAssessmentDto {
    pub course_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    pub questions: String,
    #[validate(range(min = 0))]
    pub max_score: i32,
}
