//! HTTP API for the school directory.
//!
//! One router with the registration endpoint, the listing endpoint, the
//! image upload endpoint, and static serving of stored images.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::DirectoryError;
use crate::models::NewSchool;
use crate::service::{ImageUpload, SchoolService};
use crate::upload;

/// State shared across handlers
pub struct AppState {
    /// Submission and listing orchestration
    pub service: SchoolService,
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
struct CreateSchoolResponse {
    success: bool,
    message: String,
    id: i64,
}

#[derive(Debug, Serialize)]
struct ListSchoolsResponse {
    success: bool,
    schools: Vec<crate::models::SchoolSummary>,
}

#[derive(Debug, Deserialize)]
struct ListSchoolsQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    path: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct ValidationErrorResponse {
    error: String,
    fields: BTreeMap<String, String>,
}

/// HTTP server for the school directory API
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    /// Build the server from configuration and an assembled service.
    #[must_use]
    pub fn new(config: &AppConfig, service: SchoolService) -> Self {
        let addr = config.socket_addr();
        let router = build_router(config, service);
        Self { addr, router }
    }

    /// The router (for testing without binding a socket).
    #[must_use]
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr: SocketAddr = self.addr.parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "school directory API listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Assemble the router with all endpoints.
fn build_router(config: &AppConfig, service: SchoolService) -> Router {
    let cors = if config.server.cors_origins.is_empty() {
        // No origins configured: permissive, for development
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .server
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Multipart bodies carry the image plus field overhead
    let body_limit = usize::try_from(config.upload.max_file_size_mb).unwrap_or(5) * 1024 * 1024
        + 64 * 1024;

    let uploads_dir = service.images().directory().to_path_buf();
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/schools",
            post(create_school_handler).get(list_schools_handler),
        )
        .route("/api/upload", post(upload_handler))
        .nest_service(upload::PUBLIC_PREFIX, ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/schools` — validate and persist one school record.
async fn create_school_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewSchool>,
) -> Response {
    match state.service.submit(form, None).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CreateSchoolResponse {
                success: true,
                message: "School added successfully".to_string(),
                id,
            }),
        )
            .into_response(),
        Err(DirectoryError::Validation(fields)) => (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                error: "Validation failed".to_string(),
                fields,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to add school");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to add school".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /api/schools` — the ordered summary projection, optionally filtered.
async fn list_schools_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListSchoolsQuery>,
) -> Response {
    match state.service.list(query.q.as_deref()).await {
        Ok(schools) => (
            StatusCode::OK,
            Json(ListSchoolsResponse {
                success: true,
                schools,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to fetch schools");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch schools".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `POST /api/upload` — store an image, return its path reference.
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_image_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "no image field in request".to_string(),
                }),
            )
                .into_response();
        }
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
                .into_response();
        }
    };

    match state
        .service
        .images()
        .store(&upload.content_type, &upload.bytes)
    {
        Ok(path) => (StatusCode::OK, Json(UploadResponse { path })).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Pull the `image` field out of a multipart body.
async fn read_image_field(
    multipart: &mut Multipart,
) -> std::result::Result<Option<ImageUpload>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("malformed multipart body: {e}"))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("failed to read upload: {e}"))?;

        return Ok(Some(ImageUpload {
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}
