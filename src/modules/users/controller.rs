// These handlers intentionally take no auth extractor: user mutation is open
// to any caller, replicating the platform this service replaces.

use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{CreateUserDto, UpdateUserDto, UserDto};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, AppError> {
    let users = UserService::get_users(&state.store).await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, AppError> {
    let user = UserService::get_user(&state.store, id).await?;
    Ok(Json(user))
}

/// Create a user with a pre-hashed credential
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = UserDto),
        (status = 400, description = "Invalid role or email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    let user = UserService::create_user(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace a user's profile fields
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User was modified concurrently", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UserDto>, AppError> {
    let user = UserService::update_user(&state.store, id, dto).await?;
    Ok(Json(user))
}

/// Delete a user, returning the deleted representation
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user", body = UserDto),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, AppError> {
    let user = UserService::delete_user(&state.store, id).await?;
    Ok(Json(user))
}
