// These handlers intentionally take no auth extractor: result mutation is
// open to any caller, replicating the platform this service replaces.

use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::results::model::{
    AssessmentResult, CreateResultDto, DeleteResultDto, UpdateResultDto,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::service::ResultService;

/// List all results
#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, description = "List of results", body = Vec<AssessmentResult>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn get_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssessmentResult>>, AppError> {
    let results = ResultService::get_results(&state.store).await?;
    Ok(Json(results))
}

/// Get a result by id
#[utoipa::path(
    get,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    responses(
        (status = 200, description = "Result details", body = AssessmentResult),
        (status = 404, description = "Result not found", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentResult>, AppError> {
    let result = ResultService::get_result(&state.store, id).await?;
    Ok(Json(result))
}

/// Record an assessment attempt
#[utoipa::path(
    post,
    path = "/api/results",
    request_body = CreateResultDto,
    responses(
        (status = 201, description = "Result recorded", body = AssessmentResult),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn create_result(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateResultDto>,
) -> Result<(StatusCode, Json<AssessmentResult>), AppError> {
    let result = ResultService::create_result(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Replace a result
#[utoipa::path(
    put,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated", body = AssessmentResult),
        (status = 400, description = "Body id does not match path id", body = ErrorResponse),
        (status = 404, description = "Result not found", body = ErrorResponse),
        (status = 409, description = "Result was modified concurrently", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn update_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateResultDto>,
) -> Result<Json<AssessmentResult>, AppError> {
    let result = ResultService::update_result(&state.store, id, dto).await?;
    Ok(Json(result))
}

/// Delete a result by id
#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    responses(
        (status = 204, description = "Result deleted"),
        (status = 404, description = "Result not found", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ResultService::delete_result(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a result named in the request body
#[utoipa::path(
    delete,
    path = "/api/results",
    request_body = DeleteResultDto,
    responses(
        (status = 204, description = "Result deleted"),
        (status = 404, description = "Result not found", body = ErrorResponse)
    ),
    tag = "Results"
)]
pub async fn delete_result_by_body(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<DeleteResultDto>,
) -> Result<StatusCode, AppError> {
    ResultService::delete_result(&state.store, dto.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
