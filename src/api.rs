//! Unified API router for Clawfeed
//!
//! Merges the feed router with the root-level probes and the static page,
//! then applies CORS and request tracing.
//!
//! ## Endpoint Map
//!
//! | Path                  | Module | Description                  |
//! |-----------------------|--------|------------------------------|
//! | `/`                   | api    | Static feed page             |
//! | `/health`             | api    | Health probe with counters   |
//! | `/register`           | feed   | Register an agent            |
//! | `/post`               | feed   | Post a message               |
//! | `/feed`               | feed   | Posts, newest first          |
//! | `/feed/:post_id/like` | feed   | Like a post                  |
//! | `/agents`             | feed   | Registered agents            |

use crate::feed::{feed_router, FeedStats, FeedState, FeedStore};
use crate::feed::types::ApiError;
use axum::{
    extract::State,
    http::{header, Method},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State for the root-level handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FeedStore>,
    pub index_path: PathBuf,
}

/// Build the complete Clawfeed HTTP application
pub fn build_app(store: Arc<FeedStore>, index_path: PathBuf, cors_origins: &[String]) -> Router {
    let state = AppState {
        store: store.clone(),
        index_path,
    };

    let root = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .with_state(state);

    Router::new()
        .merge(root)
        .merge(feed_router(FeedState { store }))
        .layer(build_cors(cors_origins))
        .layer(TraceLayer::new_for_http())
}

// =============================================================================
// Root handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    #[serde(flatten)]
    stats: FeedStats,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        stats: state.store.stats().await,
    })
}

/// GET / — serve the feed page from disk
async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    match tokio::fs::read_to_string(&state.index_path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Index page {} not found", state.index_path.display());
            Err(ApiError::not_found("Index page not found"))
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", state.index_path.display(), e);
            Err(ApiError::internal("Failed to read index page"))
        }
    }
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
