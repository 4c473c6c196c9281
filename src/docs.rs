use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::assessments::model::{Assessment, CreateAssessmentDto, UpdateAssessmentDto};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::results::model::{
    AssessmentResult, CreateResultDto, DeleteResultDto, UpdateResultDto,
};
use crate::modules::users::model::{CreateUserDto, UpdateUserDto, UserDto, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::get_owner_courses,
        crate::modules::courses::controller::get_course_assessments,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::assessments::controller::get_assessments,
        crate::modules::assessments::controller::get_assessment,
        crate::modules::assessments::controller::create_assessment,
        crate::modules::assessments::controller::update_assessment,
        crate::modules::assessments::controller::delete_assessment,
        crate::modules::results::controller::get_results,
        crate::modules::results::controller::get_result,
        crate::modules::results::controller::create_result,
        crate::modules::results::controller::update_result,
        crate::modules::results::controller::delete_result,
        crate::modules::results::controller::delete_result_by_body,
    ),
    components(
        schemas(
            UserRole,
            UserDto,
            CreateUserDto,
            UpdateUserDto,
            LoginRequest,
            RegisterRequestDto,
            AuthResponse,
            ErrorResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Assessment,
            CreateAssessmentDto,
            UpdateAssessmentDto,
            AssessmentResult,
            CreateResultDto,
            UpdateResultDto,
            DeleteResultDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Users", description = "User management endpoints"),
        (name = "Courses", description = "Course management endpoints"),
        (name = "Assessments", description = "Assessment management endpoints"),
        (name = "Results", description = "Assessment attempt records")
    ),
    info(
        title = "EduPulse API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for managing courses, assessments and results with JWT-based authentication.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
