use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::assessments::model::Assessment;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::service::CourseService;

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "List of courses", body = Vec<Course>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_courses(&state.store).await?;
    Ok(Json(courses))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(&state.store, id).await?;
    Ok(Json(course))
}

/// List the caller's courses (owner only)
#[utoipa::path(
    get,
    path = "/api/courses/owner/{owner_id}",
    params(("owner_id" = Uuid, Path, description = "Owner (instructor) ID")),
    responses(
        (status = 200, description = "Courses owned by the caller", body = Vec<Course>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the requested owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_owner_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_owner_courses(&state.store, &auth_user.0, owner_id).await?;
    Ok(Json(courses))
}

/// List a course's assessments (owner only)
#[utoipa::path(
    get,
    path = "/api/courses/{id}/assessments",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assessments of the course", body = Vec<Assessment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_course_assessments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Assessment>>, AppError> {
    let assessments =
        CourseService::get_course_assessments(&state.store, &auth_user.0, id).await?;
    Ok(Json(assessments))
}

/// Create a course owned by the caller
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.store, &auth_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Replace a course (owner only)
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Body id does not match path id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course was modified concurrently", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.store, &auth_user.0, id, dto).await?;
    Ok(Json(course))
}

/// Delete a course (owner only)
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.store, &auth_user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
