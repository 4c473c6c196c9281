//! Request-processing middleware.
//!
//! - [`auth`]: bearer-token extractor providing verified caller claims

pub mod auth;
