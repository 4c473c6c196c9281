//! Assessment management module.
//!
//! Assessments carry no owner of their own; mutation rights belong to the
//! owner of the referenced course.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
