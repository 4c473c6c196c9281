//! In-memory store backend.
//!
//! Backs the integration suites with the same versioning contract as the
//! Postgres backend: inserts commit at version 1, each successful
//! `update_*_if_unchanged` bumps the version, and a write against a stale or
//! vanished record is a [`StoreError::Conflict`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::modules::assessments::model::Assessment;
use crate::modules::courses::model::Course;
use crate::modules::results::model::AssessmentResult;
use crate::modules::users::model::User;
use crate::store::{StoreError, Versioned};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, Versioned<User>>,
    courses: HashMap<Uuid, Versioned<Course>>,
    assessments: HashMap<Uuid, Versioned<Assessment>>,
    results: HashMap<Uuid, Versioned<AssessmentResult>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

fn insert<T: Clone>(table: &mut HashMap<Uuid, Versioned<T>>, id: Uuid, record: T) -> T {
    table.insert(
        id,
        Versioned {
            record: record.clone(),
            version: 1,
        },
    );
    record
}

fn update_if_unchanged<T: Clone>(
    table: &mut HashMap<Uuid, Versioned<T>>,
    id: Uuid,
    incoming: Versioned<T>,
) -> Result<T, StoreError> {
    match table.get_mut(&id) {
        Some(current) if current.version == incoming.version => {
            current.record = incoming.record.clone();
            current.version += 1;
            Ok(incoming.record)
        }
        // Stale version and vanished record are the same failure here; the
        // caller re-checks existence to tell them apart.
        _ => Err(StoreError::Conflict),
    }
}

fn delete<T>(table: &mut HashMap<Uuid, Versioned<T>>, id: Uuid) -> Result<(), StoreError> {
    table.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
}

impl MemoryStore {
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("store lock poisoned")
    }

    // Users

    pub fn find_user(&self, id: Uuid) -> Option<Versioned<User>> {
        self.read().users.get(&id).cloned()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<Versioned<User>> {
        self.read()
            .users
            .values()
            .find(|v| v.record.email == email)
            .cloned()
    }

    pub fn list_users(&self) -> Vec<User> {
        self.read().users.values().map(|v| v.record.clone()).collect()
    }

    pub fn insert_user(&self, user: User) -> User {
        let id = user.id;
        insert(&mut self.write().users, id, user)
    }

    pub fn update_user_if_unchanged(&self, user: Versioned<User>) -> Result<User, StoreError> {
        let id = user.record.id;
        update_if_unchanged(&mut self.write().users, id, user)
    }

    pub fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        delete(&mut self.write().users, id)
    }

    // Courses

    pub fn find_course(&self, id: Uuid) -> Option<Versioned<Course>> {
        self.read().courses.get(&id).cloned()
    }

    pub fn list_courses(&self) -> Vec<Course> {
        self.read()
            .courses
            .values()
            .map(|v| v.record.clone())
            .collect()
    }

    pub fn courses_by_owner(&self, owner_id: Uuid) -> Vec<Course> {
        self.read()
            .courses
            .values()
            .filter(|v| v.record.owner_id == owner_id)
            .map(|v| v.record.clone())
            .collect()
    }

    pub fn insert_course(&self, course: Course) -> Course {
        let id = course.id;
        insert(&mut self.write().courses, id, course)
    }

    pub fn update_course_if_unchanged(
        &self,
        course: Versioned<Course>,
    ) -> Result<Course, StoreError> {
        let id = course.record.id;
        update_if_unchanged(&mut self.write().courses, id, course)
    }

    pub fn delete_course(&self, id: Uuid) -> Result<(), StoreError> {
        delete(&mut self.write().courses, id)
    }

    // Assessments

    pub fn find_assessment(&self, id: Uuid) -> Option<Versioned<Assessment>> {
        self.read().assessments.get(&id).cloned()
    }

    pub fn list_assessments(&self) -> Vec<Assessment> {
        self.read()
            .assessments
            .values()
            .map(|v| v.record.clone())
            .collect()
    }

    pub fn assessments_by_course(&self, course_id: Uuid) -> Vec<Assessment> {
        self.read()
            .assessments
            .values()
            .filter(|v| v.record.course_id == course_id)
            .map(|v| v.record.clone())
            .collect()
    }

    pub fn insert_assessment(&self, assessment: Assessment) -> Assessment {
        let id = assessment.id;
        insert(&mut self.write().assessments, id, assessment)
    }

    pub fn update_assessment_if_unchanged(
        &self,
        assessment: Versioned<Assessment>,
    ) -> Result<Assessment, StoreError> {
        let id = assessment.record.id;
        update_if_unchanged(&mut self.write().assessments, id, assessment)
    }

    pub fn delete_assessment(&self, id: Uuid) -> Result<(), StoreError> {
        delete(&mut self.write().assessments, id)
    }

    // Results

    pub fn find_result(&self, id: Uuid) -> Option<Versioned<AssessmentResult>> {
        self.read().results.get(&id).cloned()
    }

    pub fn list_results(&self) -> Vec<AssessmentResult> {
        self.read()
            .results
            .values()
            .map(|v| v.record.clone())
            .collect()
    }

    pub fn insert_result(&self, result: AssessmentResult) -> AssessmentResult {
        let id = result.id;
        insert(&mut self.write().results, id, result)
    }

    pub fn update_result_if_unchanged(
        &self,
        result: Versioned<AssessmentResult>,
    ) -> Result<AssessmentResult, StoreError> {
        let id = result.record.id;
        update_if_unchanged(&mut self.write().results, id, result)
    }

    pub fn delete_result(&self, id: Uuid) -> Result<(), StoreError> {
        delete(&mut self.write().results, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::UserRole;

    fn sample_course(owner_id: Uuid) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Intro to Rust".to_string(),
            description: "Ownership and borrowing".to_string(),
            owner_id,
            media_url: None,
            level: None,
            category: None,
            duration: None,
            status: None,
            price: 0.0,
        }
    }

    #[test]
    fn test_insert_commits_at_version_one() {
        let store = MemoryStore::default();
        let course = store.insert_course(sample_course(Uuid::new_v4()));

        let loaded = store.find_course(course.id).unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.record, course);
    }

    #[test]
    fn test_update_bumps_version() {
        let store = MemoryStore::default();
        let course = store.insert_course(sample_course(Uuid::new_v4()));

        let mut loaded = store.find_course(course.id).unwrap();
        loaded.record.title = "Advanced Rust".to_string();
        store.update_course_if_unchanged(loaded).unwrap();

        let reloaded = store.find_course(course.id).unwrap();
        assert_eq!(reloaded.version, 2);
        assert_eq!(reloaded.record.title, "Advanced Rust");
    }

    #[test]
    fn test_stale_update_conflicts_without_overwriting() {
        let store = MemoryStore::default();
        let course = store.insert_course(sample_course(Uuid::new_v4()));

        let stale = store.find_course(course.id).unwrap();

        let mut winner = store.find_course(course.id).unwrap();
        winner.record.title = "Winner".to_string();
        store.update_course_if_unchanged(winner).unwrap();

        let mut loser = stale;
        loser.record.title = "Loser".to_string();
        let err = store.update_course_if_unchanged(loser).unwrap_err();
        assert!(matches!(err, StoreError::Conflict));

        assert_eq!(store.find_course(course.id).unwrap().record.title, "Winner");
    }

    #[test]
    fn test_update_after_delete_conflicts() {
        let store = MemoryStore::default();
        let course = store.insert_course(sample_course(Uuid::new_v4()));

        let loaded = store.find_course(course.id).unwrap();
        store.delete_course(course.id).unwrap();

        let err = store.update_course_if_unchanged(loaded).unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = MemoryStore::default();
        let err = store.delete_course(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_find_user_by_email() {
        let store = MemoryStore::default();
        let user = store.insert_user(User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Instructor,
            password_hash: "hash".to_string(),
        });

        assert_eq!(
            store.find_user_by_email("ada@example.com").unwrap().record.id,
            user.id
        );
        assert!(store.find_user_by_email("none@example.com").is_none());
    }
}
