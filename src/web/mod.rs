//! Web API module for Figma Content.
//!
//! This module exposes the token engine over HTTP so a plugin or web
//! frontend can generate, preview and apply content entries.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/content/generate` - Generate a content matrix (requires a configured generator)
//! - `POST /api/content/preview` - Build the tokens for a content matrix without writing
//! - `POST /api/tokens/apply` - Merge a content matrix into the token files
//! - `GET /api/tokens` - List Language-layer tokens (optional `?domain=&tone=&type=`)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::error::TokenError;
use crate::models::ContentMatrix;
use crate::services::apply::ListResponse;
use crate::services::generation::GenerateResponse;
use crate::services::{
    generate_content, ApplyRequest, ApplyResult, ApplyService, ContentGenerator, GenerateRequest,
    ListQuery, PreviewResponse, TokenStore,
};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Apply/preview/list service over the token directory
    service: Arc<ApplyService>,
    /// Content generator, if one is configured
    generator: Option<Arc<dyn ContentGenerator>>,
    /// Generation attempts per request
    max_attempts: u32,
    /// Serializes read-merge-write cycles
    apply_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The generator comes from `[generation] command` in the config.
    pub fn new(config: &Config, tokens_dir: PathBuf) -> Self {
        let generator = config
            .generation
            .generator()
            .map(|g| Arc::new(g) as Arc<dyn ContentGenerator>);

        Self {
            service: Arc::new(ApplyService::new(TokenStore::new(tokens_dir))),
            generator,
            max_attempts: config.generation.max_attempts,
            apply_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Replaces the content generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Returns the token directory.
    #[must_use]
    pub fn tokens_dir(&self) -> &std::path::Path {
        self.service.store().root()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// API version.
    pub version: String,
    /// Whether `/api/content/generate` is available.
    pub generator: bool,
}

/// Body of `POST /api/content/preview`.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// Dot-separated domain.
    pub domain: String,
    /// Entry name.
    pub name: String,
    /// Content to build tokens from.
    pub content: ContentMatrix,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Maps an engine error to a status code and body.
fn token_error(err: &TokenError) -> (StatusCode, Json<ApiError>) {
    let (status, error) = match err {
        TokenError::DuplicateEntry(_) => (StatusCode::CONFLICT, "Entry already exists"),
        TokenError::InvalidContent(_)
        | TokenError::InvalidEntry(_)
        | TokenError::UnknownTone(_)
        | TokenError::UnknownType(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        TokenError::Generation { .. } => (StatusCode::BAD_GATEWAY, "Content generation failed"),
        TokenError::MalformedDocument { .. } | TokenError::Io { .. } | TokenError::Serialize(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Token storage error")
        }
    };
    (status, Json(ApiError::with_details(error, err.to_string())))
}

fn bad_body(rejection: &JsonRejection) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details(
            "Invalid request body",
            rejection.body_text(),
        )),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generator: state.generator.is_some(),
    })
}

/// POST /api/content/generate - Generate a content matrix for one entry.
async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<GenerateResponse> {
    let Json(request) = payload.map_err(|e| bad_body(&e))?;

    let Some(generator) = state.generator.clone() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("No content generator configured")),
        ));
    };

    let max_attempts = state.max_attempts;
    let job_request = request.clone();
    let content = tokio::task::spawn_blocking(move || {
        generate_content(generator.as_ref(), &job_request, max_attempts)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Generation task failed", e.to_string())),
        )
    })?
    .map_err(|e| token_error(&e))?;

    Ok(Json(GenerateResponse {
        domain: request.domain,
        name: request.name,
        content,
    }))
}

/// POST /api/content/preview - Build tokens without touching files.
async fn preview(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> ApiResult<PreviewResponse> {
    let Json(request) = payload.map_err(|e| bad_body(&e))?;

    state
        .service
        .preview(&request.domain, &request.name, &request.content)
        .map(Json)
        .map_err(|e| token_error(&e))
}

/// POST /api/tokens/apply - Merge an entry into all token files.
async fn apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> ApiResult<ApplyResult> {
    let Json(request) = payload.map_err(|e| bad_body(&e))?;

    // The lock guards no data, so a poisoned guard is still usable.
    let _guard = state
        .apply_lock
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    state.service.apply(&request).map(Json).map_err(|e| {
        warn!(domain = %request.domain, name = %request.name, error = %e, "apply rejected");
        token_error(&e)
    })
}

/// GET /api/tokens - List Language-layer tokens.
async fn list_tokens(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ListResponse> {
    state
        .service
        .list(&query)
        .map(Json)
        .map_err(|e| token_error(&e))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Intended to run next to a local design tool plugin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Content endpoints
        .route("/api/content/generate", post(generate))
        .route("/api/content/preview", post(preview))
        // Token endpoints
        .route("/api/tokens", get(list_tokens))
        .route("/api/tokens/apply", post(apply))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(
    config: Config,
    tokens_dir: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(&config, tokens_dir);
    let missing = state.service.store().missing_files();
    if !missing.is_empty() {
        warn!(
            "{} token file(s) missing in {}; run `figma-content init`",
            missing.len(),
            state.tokens_dir().display()
        );
    }

    let app = create_router(state);

    info!("Starting {} web server on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
