//! PostgreSQL store backend.
//!
//! Optimistic concurrency uses the `row_version` column: updates are
//! compare-and-swap on `(id, row_version)` and report a conflict when no row
//! matched, which covers both a concurrent write and a concurrent delete.

use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::assessments::model::Assessment;
use crate::modules::courses::model::Course;
use crate::modules::results::model::AssessmentResult;
use crate::modules::users::model::User;
use crate::store::{StoreError, Versioned};

#[derive(sqlx::FromRow)]
struct UserRow {
    #[sqlx(flatten)]
    record: User,
    row_version: i64,
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    #[sqlx(flatten)]
    record: Course,
    row_version: i64,
}

#[derive(sqlx::FromRow)]
struct AssessmentRow {
    #[sqlx(flatten)]
    record: Assessment,
    row_version: i64,
}

#[derive(sqlx::FromRow)]
struct ResultRow {
    #[sqlx(flatten)]
    record: AssessmentResult,
    row_version: i64,
}

impl From<UserRow> for Versioned<User> {
    fn from(row: UserRow) -> Self {
        Versioned {
            record: row.record,
            version: row.row_version,
        }
    }
}

impl From<CourseRow> for Versioned<Course> {
    fn from(row: CourseRow) -> Self {
        Versioned {
            record: row.record,
            version: row.row_version,
        }
    }
}

impl From<AssessmentRow> for Versioned<Assessment> {
    fn from(row: AssessmentRow) -> Self {
        Versioned {
            record: row.record,
            version: row.row_version,
        }
    }
}

impl From<ResultRow> for Versioned<AssessmentResult> {
    fn from(row: ResultRow) -> Self {
        Versioned {
            record: row.record,
            version: row.row_version,
        }
    }
}

// Users

pub(super) async fn find_user(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Versioned<User>>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, role, password_hash, row_version FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

pub(super) async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Versioned<User>>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, role, password_hash, row_version FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

pub(super) async fn list_users(pool: &PgPool) -> Result<Vec<User>, StoreError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, email, role, password_hash FROM users",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub(super) async fn insert_user(pool: &PgPool, user: User) -> Result<User, StoreError> {
    sqlx::query(
        "INSERT INTO users (id, name, email, role, password_hash) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.role)
    .bind(&user.password_hash)
    .execute(pool)
    .await?;

    Ok(user)
}

pub(super) async fn update_user_if_unchanged(
    pool: &PgPool,
    user: Versioned<User>,
) -> Result<User, StoreError> {
    let result = sqlx::query(
        "UPDATE users
         SET name = $2, email = $3, role = $4, password_hash = $5,
             row_version = row_version + 1
         WHERE id = $1 AND row_version = $6",
    )
    .bind(user.record.id)
    .bind(&user.record.name)
    .bind(&user.record.email)
    .bind(user.record.role)
    .bind(&user.record.password_hash)
    .bind(user.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::Conflict);
    }
    Ok(user.record)
}

pub(super) async fn delete_user(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

// Courses

const COURSE_COLUMNS: &str =
    "id, title, description, owner_id, media_url, level, category, duration, status, price";

pub(super) async fn find_course(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Versioned<Course>>, StoreError> {
    let row = sqlx::query_as::<_, CourseRow>(&format!(
        "SELECT {COURSE_COLUMNS}, row_version FROM courses WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

pub(super) async fn list_courses(pool: &PgPool) -> Result<Vec<Course>, StoreError> {
    let courses =
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses"))
            .fetch_all(pool)
            .await?;

    Ok(courses)
}

pub(super) async fn courses_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<Course>, StoreError> {
    let courses = sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE owner_id = $1"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

pub(super) async fn insert_course(pool: &PgPool, course: Course) -> Result<Course, StoreError> {
    sqlx::query(
        "INSERT INTO courses
             (id, title, description, owner_id, media_url, level, category, duration, status, price)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(course.id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(course.owner_id)
    .bind(&course.media_url)
    .bind(&course.level)
    .bind(&course.category)
    .bind(&course.duration)
    .bind(&course.status)
    .bind(course.price)
    .execute(pool)
    .await?;

    Ok(course)
}

pub(super) async fn update_course_if_unchanged(
    pool: &PgPool,
    course: Versioned<Course>,
) -> Result<Course, StoreError> {
    let result = sqlx::query(
        "UPDATE courses
         SET title = $2, description = $3, owner_id = $4, media_url = $5, level = $6,
             category = $7, duration = $8, status = $9, price = $10,
             row_version = row_version + 1
         WHERE id = $1 AND row_version = $11",
    )
    .bind(course.record.id)
    .bind(&course.record.title)
    .bind(&course.record.description)
    .bind(course.record.owner_id)
    .bind(&course.record.media_url)
    .bind(&course.record.level)
    .bind(&course.record.category)
    .bind(&course.record.duration)
    .bind(&course.record.status)
    .bind(course.record.price)
    .bind(course.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::Conflict);
    }
    Ok(course.record)
}

pub(super) async fn delete_course(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

// Assessments

pub(super) async fn find_assessment(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Versioned<Assessment>>, StoreError> {
    let row = sqlx::query_as::<_, AssessmentRow>(
        "SELECT id, course_id, title, questions, max_score, row_version
         FROM assessments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

pub(super) async fn list_assessments(pool: &PgPool) -> Result<Vec<Assessment>, StoreError> {
    let assessments = sqlx::query_as::<_, Assessment>(
        "SELECT id, course_id, title, questions, max_score FROM assessments",
    )
    .fetch_all(pool)
    .await?;

    Ok(assessments)
}

pub(super) async fn assessments_by_course(
    pool: &PgPool,
    course_id: Uuid,
) -> Result<Vec<Assessment>, StoreError> {
    let assessments = sqlx::query_as::<_, Assessment>(
        "SELECT id, course_id, title, questions, max_score
         FROM assessments WHERE course_id = $1",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(assessments)
}

pub(super) async fn insert_assessment(
    pool: &PgPool,
    assessment: Assessment,
) -> Result<Assessment, StoreError> {
    sqlx::query(
        "INSERT INTO assessments (id, course_id, title, questions, max_score)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(assessment.id)
    .bind(assessment.course_id)
    .bind(&assessment.title)
    .bind(&assessment.questions)
    .bind(assessment.max_score)
    .execute(pool)
    .await?;

    Ok(assessment)
}

pub(super) async fn update_assessment_if_unchanged(
    pool: &PgPool,
    assessment: Versioned<Assessment>,
) -> Result<Assessment, StoreError> {
    let result = sqlx::query(
        "UPDATE assessments
         SET course_id = $2, title = $3, questions = $4, max_score = $5,
             row_version = row_version + 1
         WHERE id = $1 AND row_version = $6",
    )
    .bind(assessment.record.id)
    .bind(assessment.record.course_id)
    .bind(&assessment.record.title)
    .bind(&assessment.record.questions)
    .bind(assessment.record.max_score)
    .bind(assessment.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::Conflict);
    }
    Ok(assessment.record)
}

pub(super) async fn delete_assessment(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

// Results

pub(super) async fn find_result(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Versioned<AssessmentResult>>, StoreError> {
    let row = sqlx::query_as::<_, ResultRow>(
        "SELECT id, assessment_id, user_id, score, attempt_date, row_version
         FROM results WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

pub(super) async fn list_results(pool: &PgPool) -> Result<Vec<AssessmentResult>, StoreError> {
    let results = sqlx::query_as::<_, AssessmentResult>(
        "SELECT id, assessment_id, user_id, score, attempt_date FROM results",
    )
    .fetch_all(pool)
    .await?;

    Ok(results)
}

pub(super) async fn insert_result(
    pool: &PgPool,
    result: AssessmentResult,
) -> Result<AssessmentResult, StoreError> {
    sqlx::query(
        "INSERT INTO results (id, assessment_id, user_id, score, attempt_date)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(result.id)
    .bind(result.assessment_id)
    .bind(result.user_id)
    .bind(result.score)
    .bind(result.attempt_date)
    .execute(pool)
    .await?;

    Ok(result)
}

pub(super) async fn update_result_if_unchanged(
    pool: &PgPool,
    result: Versioned<AssessmentResult>,
) -> Result<AssessmentResult, StoreError> {
    let outcome = sqlx::query(
        "UPDATE results
         SET assessment_id = $2, user_id = $3, score = $4, attempt_date = $5,
             row_version = row_version + 1
         WHERE id = $1 AND row_version = $6",
    )
    .bind(result.record.id)
    .bind(result.record.assessment_id)
    .bind(result.record.user_id)
    .bind(result.record.score)
    .bind(result.record.attempt_date)
    .bind(result.version)
    .execute(pool)
    .await?;

    if outcome.rows_affected() == 0 {
        return Err(StoreError::Conflict);
    }
    Ok(result.record)
}

pub(super) async fn delete_result(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM results WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
