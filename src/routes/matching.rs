use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::AdminSettings;
use crate::core::{MatchError, Matcher};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest};
use crate::services::{DirectoryClient, JobsClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub jobs: Arc<JobsClient>,
    pub matcher: Matcher,
    pub admin: AdminSettings,
}

/// Configure matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match", web::post().to(match_church));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // A directory probe doubles as a connectivity check
    let directory_healthy = state.directory.list_churches(None).await.is_ok();

    let status = if directory_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a visitor to a church
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "denomination": "no-preference",
///   "size": "medium",
///   "location": "State College",
///   "worshipStyle": "Traditional",
///   "priorities": ["music"],
///   "additionalInfo": "...",
///   "churches": [ { "id": "...", "name": "...", ... } ]
/// }
/// ```
async fn match_church(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid input: size, location, and churches are required.",
            serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null),
        ));
    }

    tracing::info!(
        "Matching against {} candidates for location {}",
        req.churches.len(),
        req.location
    );

    match state.matcher.select(&req).await {
        Ok(selection) => HttpResponse::Ok().json(selection),
        Err(e) => {
            match &e {
                MatchError::MalformedModelOutput(detail) => {
                    tracing::error!("Model output rejected: {}", detail);
                }
                MatchError::UpstreamUnavailable(detail) => {
                    tracing::warn!("Generation backend unavailable: {}", detail);
                }
                other => tracing::info!("Match request failed: {}", other),
            }
            error_response(&e)
        }
    }
}

fn error_response(error: &MatchError) -> HttpResponse {
    let status = actix_web::http::StatusCode::from_u16(error.status_code())
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse::new(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_error_response_shape() {
        let response = error_response(&MatchError::InvalidInput);
        assert_eq!(response.status().as_u16(), 400);

        let response = error_response(&MatchError::UpstreamUnavailable("429".to_string()));
        assert_eq!(response.status().as_u16(), 502);
    }
}
