//! Trait seams between the orchestration core and the remote service.
//!
//! The core never talks to `reqwest` directly: each component depends on the
//! narrow trait it needs, so tests can substitute recording fakes. The
//! production implementation for all of them is [`super::client::StudioClient`].

use async_trait::async_trait;

use crate::error::AppError;
use crate::studio::types::*;

/// The two trend endpoint forms the resolver falls back across.
#[async_trait]
pub trait TrendsApi: Send + Sync {
    /// `GET /api/trends?geo=&window=`: the current route.
    async fn trends_query(&self, geo: &str, window: &str) -> Result<TrendsResponse, AppError>;

    /// `GET /api/trends/{geo}/{window}`: legacy/alternate route.
    async fn trends_path(&self, geo: &str, window: &str) -> Result<TrendsResponse, AppError>;
}

/// Draft lifecycle operations.
#[async_trait]
pub trait DraftApi: Send + Sync {
    async fn list_ideas(&self) -> Result<Vec<Idea>, AppError>;
    async fn list_drafts(&self) -> Result<Vec<Draft>, AppError>;
    async fn create_draft(&self, body: &CreateDraftBody) -> Result<Draft, AppError>;
    async fn patch_draft(&self, id: &str, patch: &DraftPatch) -> Result<Draft, AppError>;
    async fn approve_draft(&self, id: &str) -> Result<Draft, AppError>;
    async fn delete_draft(&self, id: &str) -> Result<(), AppError>;
    async fn regen_caption(&self, id: &str) -> Result<Draft, AppError>;
    async fn regen_image(&self, id: &str) -> Result<Draft, AppError>;

    /// Export is a navigation/download side effect, never a fetch; the core
    /// only needs the URL to hand to the shell.
    fn export_url(&self, id: &str) -> String;
}

/// Feed listing and the agent critique/apply cycle.
#[async_trait]
pub trait FeedApi: Send + Sync {
    async fn feed(&self) -> Result<FeedResponse, AppError>;
    async fn delete_feed_post(&self, id: &str) -> Result<(), AppError>;
    async fn critique(&self, post_id: &str) -> Result<AgentReport, AppError>;
    async fn agent_insights(&self, post_id: &str) -> Result<AgentReport, AppError>;
    async fn apply_recommendations(&self, post_id: &str) -> Result<Draft, AppError>;
}
