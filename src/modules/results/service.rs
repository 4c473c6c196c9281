use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::results::model::{AssessmentResult, CreateResultDto, UpdateResultDto};
use crate::store::{Store, StoreError, Versioned};
use crate::utils::errors::AppError;

pub struct ResultService;

impl ResultService {
    #[instrument(skip(store))]
    pub async fn get_results(store: &Store) -> Result<Vec<AssessmentResult>, AppError> {
        store.list_results().await.map_err(AppError::database)
    }

    #[instrument(skip(store))]
    pub async fn get_result(store: &Store, id: Uuid) -> Result<AssessmentResult, AppError> {
        let result = store
            .find_result(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Result with id {} not found", id)))?;

        Ok(result.record)
    }

    /// Record an attempt. The referenced assessment and user are not
    /// validated; results are unchecked telemetry.
    #[instrument(skip(store, dto))]
    pub async fn create_result(
        store: &Store,
        dto: CreateResultDto,
    ) -> Result<AssessmentResult, AppError> {
        let result = AssessmentResult {
            id: Uuid::new_v4(),
            assessment_id: dto.assessment_id,
            user_id: dto.user_id,
            score: dto.score,
            attempt_date: dto.attempt_date,
        };

        store
            .insert_result(result)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_result(
        store: &Store,
        id: Uuid,
        dto: UpdateResultDto,
    ) -> Result<AssessmentResult, AppError> {
        if dto.id != id {
            return Err(AppError::bad_request(anyhow!(
                "Result id in body does not match id in path"
            )));
        }

        let current = store
            .find_result(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Result with id {} not found", id)))?;

        let record = AssessmentResult {
            id,
            assessment_id: dto.assessment_id,
            user_id: dto.user_id,
            score: dto.score,
            attempt_date: dto.attempt_date,
        };

        match store
            .update_result_if_unchanged(Versioned {
                record,
                version: current.version,
            })
            .await
        {
            Ok(result) => Ok(result),
            Err(StoreError::Conflict) => Err(Self::write_conflict(store, id).await),
            Err(e) => Err(AppError::database(e)),
        }
    }

    /// Decide how a lost write race on `id` surfaces: a vanished record is
    /// "not found", a surviving one is a conflict for the caller to retry.
    pub async fn write_conflict(store: &Store, id: Uuid) -> AppError {
        match store.find_result(id).await {
            Ok(Some(_)) => {
                AppError::conflict(anyhow!("Result with id {} was modified concurrently", id))
            }
            Ok(None) => AppError::not_found(anyhow!("Result with id {} not found", id)),
            Err(e) => AppError::database(e),
        }
    }

    #[instrument(skip(store))]
    pub async fn delete_result(store: &Store, id: Uuid) -> Result<(), AppError> {
        match store.delete_result(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(AppError::not_found(anyhow!(
                "Result with id {} not found",
                id
            ))),
            Err(e) => Err(AppError::database(e)),
        }
    }
}
