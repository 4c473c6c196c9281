use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserDto, UserRole};
use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{AuthResponse, Claims, LoginRequest, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, dto, jwt_config))]
    pub async fn register_user(
        store: &Store,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let Some(role) = UserRole::parse(&dto.role) else {
            return Err(AppError::bad_request(anyhow!(
                "Role must be either 'student' or 'instructor'"
            )));
        };

        let existing = store
            .find_user_by_email(&dto.email)
            .await
            .map_err(AppError::database)?;
        if existing.is_some() {
            return Err(AppError::bad_request(anyhow!("Email already registered")));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: dto.name,
            email: dto.email,
            role,
            password_hash: hash_password(&dto.password)?,
        };
        let user = store.insert_user(user).await.map_err(AppError::database)?;

        let access_token = create_access_token(&user, jwt_config)?;

        Ok(AuthResponse {
            access_token,
            user: user.into(),
        })
    }

    #[instrument(skip(store, dto, jwt_config))]
    pub async fn login_user(
        store: &Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let user = store
            .find_user_by_email(&dto.email)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid email or password")))?
            .record;

        // Wrong password and unknown email answer identically.
        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::unauthorized(anyhow!("Invalid email or password")));
        }

        let access_token = create_access_token(&user, jwt_config)?;

        Ok(AuthResponse {
            access_token,
            user: user.into(),
        })
    }

    #[instrument(skip(store, claims))]
    pub async fn get_profile(store: &Store, claims: &Claims) -> Result<UserDto, AppError> {
        let id = claims.subject_id()?;

        let user = store
            .find_user(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(user.record.into())
    }
}
