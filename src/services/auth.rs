use crate::config::AdminSettings;
use actix_web::http::header;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while gating the admin surface
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Caller is not the configured admin")]
    Forbidden,
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => 401,
            AuthError::Forbidden => 403,
        }
    }
}

/// Claims carried by the platform's access tokens
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Extract the raw bearer token from a request, if present.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Verify that the caller is the configured admin.
///
/// The bearer token must be a valid HS256 JWT signed with the platform
/// secret, and its subject or email must match the configured identity.
/// When no identity is configured at all, everything is rejected; the
/// admin surface never falls open.
pub fn verify_admin(req: &HttpRequest, settings: &AdminSettings) -> Result<Claims, AuthError> {
    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;

    let mut validation = Validation::new(Algorithm::HS256);
    // The platform sets an audience claim we don't pin
    validation.validate_aud = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &validation,
    )?;
    let claims = data.claims;

    let subject_matches = settings
        .subject
        .as_deref()
        .is_some_and(|s| s == claims.sub);
    let email_matches = match (settings.email.as_deref(), claims.email.as_deref()) {
        (Some(configured), Some(actual)) => configured.eq_ignore_ascii_case(actual),
        _ => false,
    };

    if subject_matches || email_matches {
        Ok(claims)
    } else {
        tracing::warn!("Rejected admin call from subject {}", claims.sub);
        Err(AuthError::Forbidden)
    }
}
