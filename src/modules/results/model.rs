use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A recorded assessment attempt. Results are unchecked telemetry: neither
/// `assessment_id` nor `user_id` is validated against the referenced
/// records, and no ownership check applies to mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub attempt_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateResultDto {
    pub assessment_id: Uuid,
    pub user_id: Uuid,
    #[validate(range(min = 0))]
    pub score: i32,
    pub attempt_date: DateTime<Utc>,
}

/// DTO for replacing a result. The id must match the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateResultDto {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub user_id: Uuid,
    #[validate(range(min = 0))]
    pub score: i32,
    pub attempt_date: DateTime<Utc>,
}

/// Body for the delete-by-body variant of result deletion.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DeleteResultDto {
    pub id: Uuid,
}
