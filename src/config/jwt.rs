use std::env;

/// Token-signing configuration, resolved once at startup.
///
/// The secret, issuer and audience have no sane defaults; a missing value is
/// a fatal startup error rather than something to discover per-request.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            issuer: env::var("JWT_ISSUER").expect("JWT_ISSUER must be set"),
            audience: env::var("JWT_AUDIENCE").expect("JWT_AUDIENCE must be set"),
            access_token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}
