//! In-memory feed store
//!
//! Holds every agent and post for the lifetime of the process. All state sits
//! behind one lock so that id allocation and like deduplication happen as a
//! single step with respect to concurrent requests.

use crate::error::FeedError;
use crate::feed::types::*;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Ledger {
    agents: Vec<Agent>,
    agent_index: HashMap<String, usize>,
    /// Insertion order, which is also `post_id` order
    posts: Vec<Post>,
    post_index: HashMap<u64, usize>,
    next_post_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            agent_index: HashMap::new(),
            posts: Vec::new(),
            post_index: HashMap::new(),
            next_post_id: 1,
        }
    }
}

impl Ledger {
    fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agent_index.get(agent_id).map(|&i| &self.agents[i])
    }
}

/// Shared feed store
#[derive(Debug, Default)]
pub struct FeedStore {
    inner: RwLock<Ledger>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Agents
    // =========================================================================

    /// Register an agent. Re-registering a known id returns the existing
    /// record and ignores `name`.
    pub async fn register(&self, agent_id: &str, name: &str) -> Agent {
        let mut state = self.inner.write().await;
        if let Some(existing) = state.agent(agent_id) {
            tracing::debug!(agent_id, "Agent already registered");
            return existing.clone();
        }

        let agent = Agent {
            agent_id: agent_id.to_string(),
            name: name.to_string(),
            registered_at: Utc::now(),
        };
        let idx = state.agents.len();
        state.agents.push(agent.clone());
        state.agent_index.insert(agent.agent_id.clone(), idx);

        tracing::info!(agent_id, name, "Registered agent");
        agent
    }

    /// Get an agent by ID
    pub async fn lookup(&self, agent_id: &str) -> Option<Agent> {
        self.inner.read().await.agent(agent_id).cloned()
    }

    pub async fn contains_agent(&self, agent_id: &str) -> bool {
        self.inner.read().await.agent_index.contains_key(agent_id)
    }

    /// All agents in registration order
    pub async fn list_agents(&self) -> Vec<Agent> {
        self.inner.read().await.agents.clone()
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// Append a post by `agent_id`, snapshotting the author's current name.
    ///
    /// Fails with [`FeedError::UnknownAgent`] when the author is not
    /// registered; no post id is consumed in that case.
    pub async fn create_post(&self, agent_id: &str, content: &str) -> Result<Post, FeedError> {
        let mut state = self.inner.write().await;
        let agent_name = state
            .agent(agent_id)
            .map(|a| a.name.clone())
            .ok_or_else(|| FeedError::UnknownAgent(agent_id.to_string()))?;

        let post_id = state.next_post_id;
        state.next_post_id += 1;

        let post = Post {
            post_id,
            agent_id: agent_id.to_string(),
            agent_name,
            content: content.to_string(),
            likes: 0,
            liked_by: Vec::new(),
            created_at: Utc::now(),
        };
        let idx = state.posts.len();
        state.posts.push(post.clone());
        state.post_index.insert(post_id, idx);

        tracing::info!(post_id, agent_id, "Created post");
        Ok(post)
    }

    /// Get a single post by ID
    pub async fn get_post(&self, post_id: u64) -> Option<Post> {
        let state = self.inner.read().await;
        state.post_index.get(&post_id).map(|&i| state.posts[i].clone())
    }

    /// All posts, newest first
    pub async fn get_feed(&self) -> Vec<Post> {
        self.inner.read().await.posts.iter().rev().cloned().collect()
    }

    /// Like a post. Repeated likes by the same agent leave the post unchanged.
    /// Returns `None` if no post has `post_id`.
    pub async fn like_post(&self, post_id: u64, agent_id: &str) -> Option<Post> {
        let mut state = self.inner.write().await;
        let idx = *state.post_index.get(&post_id)?;
        let post = &mut state.posts[idx];

        if post.add_like(agent_id) {
            tracing::info!(post_id, agent_id, likes = post.likes, "Liked post");
        } else {
            tracing::debug!(post_id, agent_id, "Duplicate like ignored");
        }
        Some(post.clone())
    }

    pub async fn stats(&self) -> FeedStats {
        let state = self.inner.read().await;
        FeedStats {
            agents: state.agents.len() as u64,
            posts: state.posts.len() as u64,
            likes: state.posts.iter().map(|p| p.likes).sum(),
        }
    }
}
