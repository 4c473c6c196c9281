//! Entity storage.
//!
//! Records are versioned: every committed write bumps `row_version`, and
//! read-modify-write flows hand back the version they read to the
//! `update_*_if_unchanged` operations, which refuse the write when the
//! record was modified or deleted in between ([`StoreError::Conflict`]).
//! Callers then re-check existence to decide between "not found" and a
//! surfaced conflict; the store itself never retries or merges.
//!
//! Two backends implement the same contract: [`Store::Postgres`] for
//! production and [`Store::Memory`] for the test suites.

use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::assessments::model::Assessment;
use crate::modules::courses::model::Course;
use crate::modules::results::model::AssessmentResult;
use crate::modules::users::model::User;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record was modified or deleted concurrently")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A record together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub record: T,
    pub version: i64,
}

#[derive(Clone, Debug)]
pub enum Store {
    Postgres(PgPool),
    Memory(MemoryStore),
}

impl Store {
    // Users

    pub async fn find_user(&self, id: Uuid) -> Result<Option<Versioned<User>>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::find_user(pool, id).await,
            Store::Memory(mem) => Ok(mem.find_user(id)),
        }
    }

    pub async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Versioned<User>>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::find_user_by_email(pool, email).await,
            Store::Memory(mem) => Ok(mem.find_user_by_email(email)),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::list_users(pool).await,
            Store::Memory(mem) => Ok(mem.list_users()),
        }
    }

    pub async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::insert_user(pool, user).await,
            Store::Memory(mem) => Ok(mem.insert_user(user)),
        }
    }

    pub async fn update_user_if_unchanged(
        &self,
        user: Versioned<User>,
    ) -> Result<User, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::update_user_if_unchanged(pool, user).await,
            Store::Memory(mem) => mem.update_user_if_unchanged(user),
        }
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        match self {
            Store::Postgres(pool) => postgres::delete_user(pool, id).await,
            Store::Memory(mem) => mem.delete_user(id),
        }
    }

    // Courses

    pub async fn find_course(&self, id: Uuid) -> Result<Option<Versioned<Course>>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::find_course(pool, id).await,
            Store::Memory(mem) => Ok(mem.find_course(id)),
        }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::list_courses(pool).await,
            Store::Memory(mem) => Ok(mem.list_courses()),
        }
    }

    pub async fn courses_by_owner(&self, owner_id: Uuid) -> Result<Vec<Course>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::courses_by_owner(pool, owner_id).await,
            Store::Memory(mem) => Ok(mem.courses_by_owner(owner_id)),
        }
    }

    pub async fn insert_course(&self, course: Course) -> Result<Course, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::insert_course(pool, course).await,
            Store::Memory(mem) => Ok(mem.insert_course(course)),
        }
    }

    pub async fn update_course_if_unchanged(
        &self,
        course: Versioned<Course>,
    ) -> Result<Course, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::update_course_if_unchanged(pool, course).await,
            Store::Memory(mem) => mem.update_course_if_unchanged(course),
        }
    }

    pub async fn delete_course(&self, id: Uuid) -> Result<(), StoreError> {
        match self {
            Store::Postgres(pool) => postgres::delete_course(pool, id).await,
            Store::Memory(mem) => mem.delete_course(id),
        }
    }

    // Assessments

    pub async fn find_assessment(
        &self,
        id: Uuid,
    ) -> Result<Option<Versioned<Assessment>>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::find_assessment(pool, id).await,
            Store::Memory(mem) => Ok(mem.find_assessment(id)),
        }
    }

    pub async fn list_assessments(&self) -> Result<Vec<Assessment>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::list_assessments(pool).await,
            Store::Memory(mem) => Ok(mem.list_assessments()),
        }
    }

    pub async fn assessments_by_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<Assessment>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::assessments_by_course(pool, course_id).await,
            Store::Memory(mem) => Ok(mem.assessments_by_course(course_id)),
        }
    }

    pub async fn insert_assessment(&self, assessment: Assessment) -> Result<Assessment, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::insert_assessment(pool, assessment).await,
            Store::Memory(mem) => Ok(mem.insert_assessment(assessment)),
        }
    }

    pub async fn update_assessment_if_unchanged(
        &self,
        assessment: Versioned<Assessment>,
    ) -> Result<Assessment, StoreError> {
        match self {
            Store::Postgres(pool) => {
                postgres::update_assessment_if_unchanged(pool, assessment).await
            }
            Store::Memory(mem) => mem.update_assessment_if_unchanged(assessment),
        }
    }

    pub async fn delete_assessment(&self, id: Uuid) -> Result<(), StoreError> {
        match self {
            Store::Postgres(pool) => postgres::delete_assessment(pool, id).await,
            Store::Memory(mem) => mem.delete_assessment(id),
        }
    }

    // Results

    pub async fn find_result(
        &self,
        id: Uuid,
    ) -> Result<Option<Versioned<AssessmentResult>>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::find_result(pool, id).await,
            Store::Memory(mem) => Ok(mem.find_result(id)),
        }
    }

    pub async fn list_results(&self) -> Result<Vec<AssessmentResult>, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::list_results(pool).await,
            Store::Memory(mem) => Ok(mem.list_results()),
        }
    }

    pub async fn insert_result(
        &self,
        result: AssessmentResult,
    ) -> Result<AssessmentResult, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::insert_result(pool, result).await,
            Store::Memory(mem) => Ok(mem.insert_result(result)),
        }
    }

    pub async fn update_result_if_unchanged(
        &self,
        result: Versioned<AssessmentResult>,
    ) -> Result<AssessmentResult, StoreError> {
        match self {
            Store::Postgres(pool) => postgres::update_result_if_unchanged(pool, result).await,
            Store::Memory(mem) => mem.update_result_if_unchanged(result),
        }
    }

    pub async fn delete_result(&self, id: Uuid) -> Result<(), StoreError> {
        match self {
            Store::Postgres(pool) => postgres::delete_result(pool, id).await,
            Store::Memory(mem) => mem.delete_result(id),
        }
    }
}
