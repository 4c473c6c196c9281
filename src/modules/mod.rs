//! Feature modules, one per resource.
//!
//! Each module follows the same structure: `controller.rs` (HTTP handlers),
//! `service.rs` (business logic), `model.rs` (entities and DTOs),
//! `router.rs` (route table).

pub mod assessments;
pub mod auth;
pub mod courses;
pub mod results;
pub mod users;
