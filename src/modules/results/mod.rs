//! Result management module. Results are unchecked telemetry.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
