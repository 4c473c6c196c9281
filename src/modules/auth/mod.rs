//! Authentication module: registration, login and the caller's profile.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
