use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use crate::guard;
use crate::modules::assessments::model::Assessment;
use crate::modules::auth::model::Claims;
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::store::{Store, StoreError, Versioned};
use crate::utils::errors::AppError;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn get_courses(store: &Store) -> Result<Vec<Course>, AppError> {
        store.list_courses().await.map_err(AppError::database)
    }

    #[instrument(skip(store))]
    pub async fn get_course(store: &Store, id: Uuid) -> Result<Course, AppError> {
        let course = store
            .find_course(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Course with id {} not found", id)))?;

        Ok(course.record)
    }

    /// Owner-only listing of an instructor's courses.
    #[instrument(skip(store, claims))]
    pub async fn get_owner_courses(
        store: &Store,
        claims: &Claims,
        owner_id: Uuid,
    ) -> Result<Vec<Course>, AppError> {
        if claims.subject_id()? != owner_id {
            return Err(AppError::forbidden(anyhow!(
                "You may only list your own courses"
            )));
        }

        store
            .courses_by_owner(owner_id)
            .await
            .map_err(AppError::database)
    }

    /// Owner-only listing of a course's assessments.
    #[instrument(skip(store, claims))]
    pub async fn get_course_assessments(
        store: &Store,
        claims: &Claims,
        course_id: Uuid,
    ) -> Result<Vec<Assessment>, AppError> {
        let course = store
            .find_course(course_id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::not_found(anyhow!("Course with id {} not found", course_id))
            })?;

        guard::require_course_owner(claims, &course.record)?;

        store
            .assessments_by_course(course_id)
            .await
            .map_err(AppError::database)
    }

    /// Create a course owned by the caller. Any owner id in the payload is
    /// ignored.
    #[instrument(skip(store, claims, dto))]
    pub async fn create_course(
        store: &Store,
        claims: &Claims,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let owner_id = claims.subject_id()?;

        let course = Course {
            id: Uuid::new_v4(),
            title: dto.title,
            description: dto.description,
            owner_id,
            media_url: dto.media_url,
            level: dto.level,
            category: dto.category,
            duration: dto.duration,
            status: dto.status,
            price: dto.price,
        };

        store
            .insert_course(course)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(store, claims, dto))]
    pub async fn update_course(
        store: &Store,
        claims: &Claims,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        if dto.id != id {
            return Err(AppError::bad_request(anyhow!(
                "Course id in body does not match id in path"
            )));
        }

        let current = store
            .find_course(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Course with id {} not found", id)))?;

        guard::require_course_owner(claims, &current.record)?;

        // The owner is never taken from the body.
        let record = Course {
            id,
            title: dto.title,
            description: dto.description,
            owner_id: current.record.owner_id,
            media_url: dto.media_url,
            level: dto.level,
            category: dto.category,
            duration: dto.duration,
            status: dto.status,
            price: dto.price,
        };

        match store
            .update_course_if_unchanged(Versioned {
                record,
                version: current.version,
            })
            .await
        {
            Ok(course) => Ok(course),
            Err(StoreError::Conflict) => Err(Self::write_conflict(store, id).await),
            Err(e) => Err(AppError::database(e)),
        }
    }

    /// Decide how a lost write race on `id` surfaces: a vanished record is
    /// "not found", a surviving one is a conflict for the caller to retry.
    pub async fn write_conflict(store: &Store, id: Uuid) -> AppError {
        match store.find_course(id).await {
            Ok(Some(_)) => AppError::conflict(anyhow!(
                "Course with id {} was modified concurrently",
                id
            )),
            Ok(None) => AppError::not_found(anyhow!("Course with id {} not found", id)),
            Err(e) => AppError::database(e),
        }
    }

    #[instrument(skip(store, claims))]
    pub async fn delete_course(store: &Store, claims: &Claims, id: Uuid) -> Result<(), AppError> {
        let course = store
            .find_course(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Course with id {} not found", id)))?;

        guard::require_course_owner(claims, &course.record)?;

        match store.delete_course(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(AppError::not_found(anyhow!(
                "Course with id {} not found",
                id
            ))),
            Err(e) => Err(AppError::database(e)),
        }
    }
}
