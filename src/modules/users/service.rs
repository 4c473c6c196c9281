use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User, UserDto, UserRole};
use crate::store::{Store, StoreError, Versioned};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    #[instrument(skip(store))]
    pub async fn get_users(store: &Store) -> Result<Vec<UserDto>, AppError> {
        let users = store.list_users().await.map_err(AppError::database)?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &Store, id: Uuid) -> Result<UserDto, AppError> {
        let user = store
            .find_user(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User with id {} not found", id)))?;

        Ok(user.record.into())
    }

    #[instrument(skip(store, dto))]
    pub async fn create_user(store: &Store, dto: CreateUserDto) -> Result<UserDto, AppError> {
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
            password_hash: dto.password_hash,
        };
        let user = store.insert_user(user).await.map_err(AppError::database)?;

        Ok(user.into())
    }

    #[instrument(skip(store, dto))]
    pub async fn update_user(
        store: &Store,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<UserDto, AppError> {
        let Some(role) = UserRole::parse(&dto.role) else {
            return Err(AppError::bad_request(anyhow!(
                "Role must be either 'student' or 'instructor'"
            )));
        };

        let current = store
            .find_user(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User with id {} not found", id)))?;

        if dto.email != current.record.email {
            let taken = store
                .find_user_by_email(&dto.email)
                .await
                .map_err(AppError::database)?;
            if taken.is_some() {
                return Err(AppError::bad_request(anyhow!("Email already registered")));
            }
        }

        let record = User {
            id,
            name: dto.name,
            email: dto.email,
            role,
            password_hash: current.record.password_hash,
        };

        match store
            .update_user_if_unchanged(Versioned {
                record,
                version: current.version,
            })
            .await
        {
            Ok(user) => Ok(user.into()),
            Err(StoreError::Conflict) => Err(Self::write_conflict(store, id).await),
            Err(e) => Err(AppError::database(e)),
        }
    }

    /// Decide how a lost write race on `id` surfaces: a vanished record is
    /// "not found", a surviving one is a conflict for the caller to retry.
    pub async fn write_conflict(store: &Store, id: Uuid) -> AppError {
        match store.find_user(id).await {
            Ok(Some(_)) => {
                AppError::conflict(anyhow!("User with id {} was modified concurrently", id))
            }
            Ok(None) => AppError::not_found(anyhow!("User with id {} not found", id)),
            Err(e) => AppError::database(e),
        }
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &Store, id: Uuid) -> Result<UserDto, AppError> {
        let user = store
            .find_user(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User with id {} not found", id)))?;

        match store.delete_user(id).await {
            Ok(()) => Ok(user.record.into()),
            Err(StoreError::NotFound) => {
                Err(AppError::not_found(anyhow!("User with id {} not found", id)))
            }
            Err(e) => Err(AppError::database(e)),
        }
    }
}
