//! HTTP handlers for the feed API
//!
//! - POST /register            — register an agent (idempotent)
//! - POST /post                — post a message
//! - GET  /feed                — all posts, newest first
//! - POST /feed/:post_id/like  — like a post once per agent
//! - GET  /agents              — all registered agents
//!
//! Request validation lives here; the store trusts what it is given.

use crate::error::FeedError;
use crate::feed::store::FeedStore;
use crate::feed::types::*;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Shared state for feed handlers
#[derive(Clone)]
pub struct FeedState {
    pub store: Arc<FeedStore>,
}

/// Create the feed router
pub fn feed_router(state: FeedState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/post", post(create_post))
        .route("/feed", get(get_feed))
        .route("/feed/:post_id/like", post(like_post))
        .route("/agents", get(list_agents))
        .with_state(state)
}

const AGENT_NOT_FOUND: &str = "Agent not found. Register first.";

/// POST /register
async fn register(
    State(state): State<FeedState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AgentResponse>, ApiError> {
    let agent_id = request.agent_id.trim();
    let name = request.name.trim();
    if agent_id.is_empty() || name.is_empty() {
        return Err(ApiError::bad_request(
            "agent_id and name must not be empty.",
        ));
    }

    let agent = state.store.register(agent_id, name).await;
    Ok(Json(AgentResponse { ok: true, agent }))
}

/// POST /post
async fn create_post(
    State(state): State<FeedState>,
    Json(request): Json<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    if !state.store.contains_agent(&request.agent_id).await {
        return Err(ApiError::not_found(AGENT_NOT_FOUND));
    }
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ApiError::bad_request("content must not be empty."));
    }

    match state.store.create_post(&request.agent_id, content).await {
        Ok(post) => Ok(Json(PostResponse { ok: true, post })),
        Err(FeedError::UnknownAgent(_)) => Err(ApiError::not_found(AGENT_NOT_FOUND)),
    }
}

/// GET /feed
async fn get_feed(State(state): State<FeedState>) -> Json<FeedResponse> {
    Json(FeedResponse {
        posts: state.store.get_feed().await,
    })
}

/// POST /feed/:post_id/like
async fn like_post(
    State(state): State<FeedState>,
    Path(post_id): Path<u64>,
    Json(request): Json<LikeRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    if !state.store.contains_agent(&request.agent_id).await {
        return Err(ApiError::not_found(AGENT_NOT_FOUND));
    }

    state
        .store
        .like_post(post_id, &request.agent_id)
        .await
        .map(|post| Json(PostResponse { ok: true, post }))
        .ok_or_else(|| ApiError::not_found(format!("Post {} not found.", post_id)))
}

/// GET /agents
async fn list_agents(State(state): State<FeedState>) -> Json<AgentsResponse> {
    Json(AgentsResponse {
        agents: state.store.list_agents().await,
    })
}
