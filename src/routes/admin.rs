use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

use crate::models::{CreateChurchRequest, ErrorResponse, UpdateChurchRequest};
use crate::routes::matching::AppState;
use crate::services::{bearer_token, verify_admin, AuthError, DirectoryError, JobName};

/// Configure directory and maintenance routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/churches", web::get().to(list_churches))
        .route("/churches", web::post().to(create_church))
        .route("/churches/{id}", web::get().to(get_church))
        .route("/churches/{id}", web::put().to(update_church))
        .route("/churches/{id}", web::delete().to(delete_church))
        .route("/jobs/{name}", web::post().to(run_job));
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    location: Option<String>,
}

/// List churches, optionally filtered by location
///
/// GET /api/v1/churches?location={location}
async fn list_churches(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match state
        .directory
        .list_churches(query.location.as_deref())
        .await
    {
        Ok(churches) => HttpResponse::Ok().json(churches),
        Err(e) => {
            tracing::error!("Failed to list churches: {}", e);
            directory_error_response(&e)
        }
    }
}

/// Fetch a single church
///
/// GET /api/v1/churches/{id}
async fn get_church(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.directory.get_church(&path).await {
        Ok(church) => HttpResponse::Ok().json(church),
        Err(e) => directory_error_response(&e),
    }
}

/// Add a church to the directory (admin)
///
/// POST /api/v1/churches
async fn create_church(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<CreateChurchRequest>,
) -> impl Responder {
    if let Err(response) = require_admin(&http_req, &state) {
        return response;
    }

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Validation failed",
            serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null),
        ));
    }

    match state.directory.create_church(&req).await {
        Ok(church) => HttpResponse::Created().json(church),
        Err(e) => {
            tracing::error!("Failed to create church: {}", e);
            directory_error_response(&e)
        }
    }
}

/// Update a church (admin)
///
/// PUT /api/v1/churches/{id}
async fn update_church(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
    req: web::Json<UpdateChurchRequest>,
) -> impl Responder {
    if let Err(response) = require_admin(&http_req, &state) {
        return response;
    }

    match state.directory.update_church(&path, &req).await {
        Ok(church) => HttpResponse::Ok().json(church),
        Err(e) => {
            tracing::error!("Failed to update church {}: {}", path, e);
            directory_error_response(&e)
        }
    }
}

/// Remove a church from the directory (admin)
///
/// DELETE /api/v1/churches/{id}
async fn delete_church(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_admin(&http_req, &state) {
        return response;
    }

    match state.directory.delete_church(&path).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            tracing::error!("Failed to delete church {}: {}", path, e);
            directory_error_response(&e)
        }
    }
}

/// Trigger a maintenance job (admin)
///
/// POST /api/v1/jobs/{import|refresh-sites|enrich}
///
/// The collaborator's status and result body are passed through verbatim.
async fn run_job(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = require_admin(&http_req, &state) {
        return response;
    }

    let job = match JobName::parse(&path) {
        Some(job) => job,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse::new(format!(
                "Unknown job \"{}\"; expected import, refresh-sites, or enrich",
                path
            )));
        }
    };

    // Forward the caller's own token so the collaborator sees who asked
    let bearer = bearer_token(&http_req);

    match state.jobs.run(job, bearer).await {
        Ok(outcome) => {
            let status = actix_web::http::StatusCode::from_u16(outcome.status)
                .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(outcome.body)
        }
        Err(e) => {
            tracing::error!("Job {} failed to start: {}", job.endpoint(), e);
            HttpResponse::BadGateway().json(ErrorResponse::new(e.to_string()))
        }
    }
}

fn require_admin(req: &HttpRequest, state: &AppState) -> Result<(), HttpResponse> {
    match verify_admin(req, &state.admin) {
        Ok(_) => Ok(()),
        Err(e) => Err(auth_error_response(&e)),
    }
}

fn auth_error_response(error: &AuthError) -> HttpResponse {
    let status = actix_web::http::StatusCode::from_u16(error.status_code())
        .unwrap_or(actix_web::http::StatusCode::UNAUTHORIZED);
    HttpResponse::build(status).json(ErrorResponse::new(error.to_string()))
}

fn directory_error_response(error: &DirectoryError) -> HttpResponse {
    match error {
        DirectoryError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse::new(error.to_string()))
        }
        _ => HttpResponse::BadGateway().json(ErrorResponse::new(error.to_string())),
    }
}
