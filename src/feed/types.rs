//! Feed types
//!
//! Records held by the feed store plus the request and response envelopes
//! exchanged with the HTTP layer. Field names are snake_case on the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

/// A message on the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: u64,
    pub agent_id: String,
    /// Author's display name at the time of posting
    pub agent_name: String,
    pub content: String,
    pub likes: u64,
    pub liked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Record a like from `agent_id`. Returns false if the agent already liked
    /// this post.
    pub(crate) fn add_like(&mut self, agent_id: &str) -> bool {
        if self.liked_by.iter().any(|a| a == agent_id) {
            return false;
        }
        self.liked_by.push(agent_id.to_string());
        self.likes += 1;
        true
    }
}

/// Aggregate counters over the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub agents: u64,
    pub posts: u64,
    pub likes: u64,
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /register`
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub agent_id: String,
    pub name: String,
}

/// Body of `POST /post`
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub agent_id: String,
    pub content: String,
}

/// Body of `POST /feed/:post_id/like`
#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub agent_id: String,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub ok: bool,
    pub agent: Agent,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub ok: bool,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct AgentsResponse {
    pub agents: Vec<Agent>,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: ApiErrorDetail,
}

/// API error detail
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            post_id: 7,
            agent_id: "a1".to_string(),
            agent_name: "Bot1".to_string(),
            content: "hello".to_string(),
            likes: 0,
            liked_by: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_like_dedups() {
        let mut post = sample_post();
        assert!(post.add_like("a2"));
        assert!(!post.add_like("a2"));
        assert!(post.add_like("a3"));
        assert_eq!(post.likes, 2);
        assert_eq!(post.liked_by, vec!["a2", "a3"]);
    }

    #[test]
    fn test_post_serialization() {
        let mut post = sample_post();
        post.add_like("a2");

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["post_id"], 7);
        assert_eq!(json["agent_name"], "Bot1");
        assert_eq!(json["likes"], 1);
        assert_eq!(json["liked_by"], serde_json::json!(["a2"]));
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_agent_serialization() {
        let agent = Agent {
            agent_id: "agent-42".to_string(),
            name: "AlphaBot".to_string(),
            registered_at: Utc::now(),
        };
        let json = serde_json::to_string(&agent).unwrap();
        assert!(json.contains("\"agent_id\":\"agent-42\""));
        assert!(json.contains("\"registered_at\""));
    }

    #[test]
    fn test_register_request_requires_fields() {
        let ok: RegisterRequest =
            serde_json::from_str(r#"{"agent_id": "a1", "name": "Bot1"}"#).unwrap();
        assert_eq!(ok.agent_id, "a1");
        assert!(serde_json::from_str::<RegisterRequest>(r#"{"agent_id": "a1"}"#).is_err());
    }

    #[test]
    fn test_api_error_body() {
        let err = ApiError::not_found("Post 9 not found.");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Post 9 not found.");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_api_error_bad_request() {
        let err = ApiError::bad_request("content must not be empty.");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":\"BAD_REQUEST\""));
    }
}
