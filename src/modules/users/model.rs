//! User entity and DTOs.
//!
//! [`User`] is the stored record and carries the password hash; it is never
//! serialized. Responses use [`UserDto`], which mirrors the record minus the
//! credential.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Platform role. Fixed at registration; there is no safe endpoint that
/// changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(UserRole::Student),
            "instructor" => Some(UserRole::Instructor),
            _ => None,
        }
    }
}

/// A user record as stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
}

/// Wire representation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// DTO for creating a user directly (as opposed to self-registration).
/// The credential arrives pre-hashed; registration is the hashing entry
/// point.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub password_hash: String,
}

/// DTO for replacing a user's profile fields. The stored credential is kept.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        assert_eq!(UserRole::parse("student"), Some(UserRole::Student));
        assert_eq!(UserRole::parse("instructor"), Some(UserRole::Instructor));
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::parse("Student"), None);

        assert_eq!(UserRole::parse(UserRole::Student.as_str()), Some(UserRole::Student));
        assert_eq!(
            UserRole::parse(UserRole::Instructor.as_str()),
            Some(UserRole::Instructor)
        );
    }

    #[test]
    fn test_user_dto_excludes_credential() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Instructor,
            password_hash: "$2b$12$secret".to_string(),
        };

        let serialized = serde_json::to_string(&UserDto::from(user)).unwrap();
        assert!(serialized.contains("ada@example.com"));
        assert!(!serialized.contains("secret"));
    }

    #[test]
    fn test_create_user_dto_validation() {
        let dto = CreateUserDto {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            role: "student".to_string(),
            password_hash: "hash".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
