//! # notafacil-api
//!
//! HTTP API server for notafacil.
//!
//! The router is built from an [`AppState`] holding the services, and the
//! services hold repository trait objects, so the same router runs over
//! PostgreSQL in the binary and over in-memory repositories in tests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use notafacil_core::{
    ImportMode, ImportSummary, NoteRecord, NoteRepository, SearchScope, TagRecord, TagRepository,
};

pub use config::{AppConfig, AppEnv, LogConfig};
pub use error::ApiError;
use services::{ExportService, ImportService, NoteService, SearchService, TagService};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub search: SearchService,
    pub notes: NoteService,
    pub export: ExportService,
    pub import: ImportService,
    pub tags: TagService,
}

impl AppState {
    /// Wire every service to the given repositories.
    pub fn new(notes: Arc<dyn NoteRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self {
            search: SearchService::new(notes.clone()),
            notes: NoteService::new(notes.clone()),
            export: ExportService::new(notes.clone()),
            import: ImportService::new(notes),
            tags: TagService::new(tags),
        }
    }
}

// =============================================================================
// OPENAPI
// =============================================================================

/// OpenAPI documentation, served at `/api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NotaFacil API",
        description = "Notes with tags, search, and JSON import/export"
    ),
    paths(
        handlers::health_check,
        handlers::notes::search_notes,
        handlers::notes::create_note,
        handlers::notes::export_notes,
        handlers::notes::import_notes,
        handlers::notes::get_note,
        handlers::notes::delete_note,
        handlers::tags::list_tags,
        handlers::tags::create_tag,
        handlers::tags::delete_tag,
    ),
    components(schemas(
        NoteRecord,
        TagRecord,
        ImportSummary,
        ImportMode,
        SearchScope,
        services::CreateNoteRequest,
        services::CreateTagRequest,
        handlers::notes::ImportNotesRequest,
    )),
    tags(
        (name = "Notes", description = "Note search, creation, import and export"),
        (name = "Tags", description = "Tag management"),
        (name = "System", description = "Health checks and API metadata")
    )
)]
pub struct ApiDoc;

// =============================================================================
// ROUTER
// =============================================================================

/// Routes bound to state, without middleware.
pub fn router(state: AppState) -> Router {
    use handlers::{notes, tags};

    Router::new()
        // System
        .route("/api/health", get(handlers::health_check))
        .route("/api/openapi.json", get(handlers::openapi_json))
        // Notes
        .route("/api/notes", get(notes::search_notes).post(notes::create_note))
        .route("/api/notes/export", get(notes::export_notes))
        .route("/api/notes/import", post(notes::import_notes))
        .route(
            "/api/notes/:id",
            get(notes::get_note).delete(notes::delete_note),
        )
        // Tags
        .route("/api/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/api/tags/:id", delete(tags::delete_tag))
        .with_state(state)
}

/// Full application: routes plus tracing, request ids, CORS and body limit.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
