use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::assessments::model::{Assessment, CreateAssessmentDto, UpdateAssessmentDto};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::service::AssessmentService;

/// List all assessments
#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "List of assessments", body = Vec<Assessment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn get_assessments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Assessment>>, AppError> {
    let assessments = AssessmentService::get_assessments(&state.store).await?;
    Ok(Json(assessments))
}

/// Get an assessment by id
#[utoipa::path(
    get,
    path = "/api/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Assessment details", body = Assessment),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Assessment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn get_assessment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Assessment>, AppError> {
    let assessment = AssessmentService::get_assessment(&state.store, id).await?;
    Ok(Json(assessment))
}

/// Create an assessment under a course the caller owns
#[utoipa::path(
    post,
    path = "/api/assessments",
    request_body = CreateAssessmentDto,
    responses(
        (status = 201, description = "Assessment created successfully", body = Assessment),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn create_assessment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAssessmentDto>,
) -> Result<(StatusCode, Json<Assessment>), AppError> {
    let assessment =
        AssessmentService::create_assessment(&state.store, &auth_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// Replace an assessment (course owner only)
#[utoipa::path(
    put,
    path = "/api/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    request_body = UpdateAssessmentDto,
    responses(
        (status = 200, description = "Assessment updated", body = Assessment),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the course owner", body = ErrorResponse),
        (status = 404, description = "Assessment or course not found", body = ErrorResponse),
        (status = 409, description = "Assessment was modified concurrently", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn update_assessment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAssessmentDto>,
) -> Result<Json<Assessment>, AppError> {
    let assessment =
        AssessmentService::update_assessment(&state.store, &auth_user.0, id, dto).await?;
    Ok(Json(assessment))
}

/// Delete an assessment (course owner only)
#[utoipa::path(
    delete,
    path = "/api/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 204, description = "Assessment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the course owner", body = ErrorResponse),
        (status = 404, description = "Assessment or course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn delete_assessment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AssessmentService::delete_assessment(&state.store, &auth_user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
