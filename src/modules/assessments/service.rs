use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use crate::guard;
use crate::modules::assessments::model::{Assessment, CreateAssessmentDto, UpdateAssessmentDto};
use crate::modules::auth::model::Claims;
use crate::store::{Store, StoreError, Versioned};
use crate::utils::errors::AppError;

pub struct AssessmentService;

impl AssessmentService {
    #[instrument(skip(store))]
    pub async fn get_assessments(store: &Store) -> Result<Vec<Assessment>, AppError> {
        store.list_assessments().await.map_err(AppError::database)
    }

    #[instrument(skip(store))]
    pub async fn get_assessment(store: &Store, id: Uuid) -> Result<Assessment, AppError> {
        let assessment = store
            .find_assessment(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!("Assessment with id {} not found", id))
            })?;

        Ok(assessment.record)
    }

    /// Create an assessment under a course the caller owns.
    ///
    /// The parent course's existence is checked before ownership, so a
    /// missing course is always "not found", never "forbidden".
    #[instrument(skip(store, claims, dto))]
    pub async fn create_assessment(
        store: &Store,
        claims: &Claims,
        dto: CreateAssessmentDto,
    ) -> Result<Assessment, AppError> {
        let course = store
            .find_course(dto.course_id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!("Course with id {} not found", dto.course_id))
            })?;

        guard::require_course_owner(claims, &course.record)?;

        let assessment = Assessment {
            id: Uuid::new_v4(),
            course_id: dto.course_id,
            title: dto.title,
            questions: dto.questions,
            max_score: dto.max_score,
        };

        store
            .insert_assessment(assessment)
            .await
            .map_err(AppError::database)
    }

    /// Replace an assessment. Ownership is decided by the current parent
    /// course; a changed `course_id` must still name an existing course.
    #[instrument(skip(store, claims, dto))]
    pub async fn update_assessment(
        store: &Store,
        claims: &Claims,
        id: Uuid,
        dto: UpdateAssessmentDto,
    ) -> Result<Assessment, AppError> {
        let current = store
            .find_assessment(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!("Assessment with id {} not found", id))
            })?;

        let course = store
            .find_course(current.record.course_id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!(
                    "Course with id {} not found",
                    current.record.course_id
                ))
            })?;

        guard::require_course_owner(claims, &course.record)?;

        if dto.course_id != current.record.course_id {
            let target = store
                .find_course(dto.course_id)
                .await
                .map_err(AppError::database)?;
            if target.is_none() {
                return Err(AppError::not_found(anyhow!(
                    "Course with id {} not found",
                    dto.course_id
                )));
            }
        }

        let record = Assessment {
            id,
            course_id: dto.course_id,
            title: dto.title,
            questions: dto.questions,
            max_score: dto.max_score,
        };

        match store
            .update_assessment_if_unchanged(Versioned {
                record,
                version: current.version,
            })
            .await
        {
            Ok(assessment) => Ok(assessment),
            Err(StoreError::Conflict) => Err(Self::write_conflict(store, id).await),
            Err(e) => Err(AppError::database(e)),
        }
    }

    /// Decide how a lost write race on `id` surfaces: a vanished record is
    /// "not found", a surviving one is a conflict for the caller to retry.
    pub async fn write_conflict(store: &Store, id: Uuid) -> AppError {
        match store.find_assessment(id).await {
            Ok(Some(_)) => AppError::conflict(anyhow!(
                "Assessment with id {} was modified concurrently",
                id
            )),
            Ok(None) => AppError::not_found(anyhow!("Assessment with id {} not found", id)),
            Err(e) => AppError::database(e),
        }
    }

    #[instrument(skip(store, claims))]
    pub async fn delete_assessment(
        store: &Store,
        claims: &Claims,
        id: Uuid,
    ) -> Result<(), AppError> {
        let assessment = store
            .find_assessment(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!("Assessment with id {} not found", id))
            })?;

        let course = store
            .find_course(assessment.record.course_id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!(
                    "Course with id {} not found",
                    assessment.record.course_id
                ))
            })?;

        guard::require_course_owner(claims, &course.record)?;

        match store.delete_assessment(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(AppError::not_found(anyhow!(
                "Assessment with id {} not found",
                id
            ))),
            Err(e) => Err(AppError::database(e)),
        }
    }
}
