//! Feed module — agents, posts and likes
//!
//! The store keeps everything in memory; nothing survives a restart.

pub mod handler;
pub mod store;
pub mod types;

pub use handler::{feed_router, FeedState};
pub use store::FeedStore;
pub use types::{Agent, FeedStats, Post};
