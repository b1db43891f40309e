//! Feed analytics agent loop: critique a published post, then apply its
//! recommendations as a brand-new draft.
//!
//! Apply is gated on the *fetched* post carrying an agent block: the gate is
//! re-derived from server data on every render, never from a client-side
//! flag. Critique and apply share one busy claim per post, so only one of
//! the pair can be in flight for a given card.

use std::sync::Arc;

use crate::error::AppError;
use crate::orchestrator::gate::{ActionGate, Confirm};
use crate::studio::api::FeedApi;
use crate::studio::types::{AgentReport, Draft, FeedPost, FeedResponse};

pub struct FeedAgent {
    api: Arc<dyn FeedApi>,
    gate: Arc<ActionGate>,
}

impl FeedAgent {
    pub fn new(api: Arc<dyn FeedApi>, gate: Arc<ActionGate>) -> Self {
        Self { api, gate }
    }

    pub fn gate(&self) -> &Arc<ActionGate> {
        &self.gate
    }

    /// Fetch the authoritative feed. Callers re-invoke this after every
    /// settled mutation instead of patching local copies.
    pub async fn feed(&self) -> Result<FeedResponse, AppError> {
        self.api.feed().await
    }

    /// Run the agent critique for one post, populating its `agent` block
    /// server-side. The caller re-fetches the feed to pick it up.
    pub async fn critique(&self, post_id: &str) -> Result<AgentReport, AppError> {
        let _guard = self.gate.try_claim(post_id)?;
        self.api.critique(post_id).await
    }

    /// Read back a stored critique without re-running the agent.
    pub async fn insights(&self, post_id: &str) -> Result<AgentReport, AppError> {
        self.api.agent_insights(post_id).await
    }

    /// Create a new draft seeded by the post's recommendations (with a newly
    /// generated image). Requires a prior successful critique: a post whose
    /// fetched state has no agent block is rejected before any request.
    pub async fn apply(&self, post: &FeedPost) -> Result<Draft, AppError> {
        if post.agent.is_none() {
            return Err(AppError::Validation(
                "run the critique before applying recommendations".into(),
            ));
        }
        let _guard = self.gate.try_claim(&post.id)?;
        self.api.apply_recommendations(&post.id).await
    }

    /// Remove a post from the feed simulation, after explicit confirmation.
    pub async fn delete_post(&self, id: &str, confirm: &dyn Confirm) -> Result<bool, AppError> {
        if !confirm.confirm("Remove this post from the feed simulation?") {
            return Ok(false);
        }
        let _guard = self.gate.try_claim(id)?;
        self.api.delete_feed_post(id).await?;
        Ok(true)
    }
}

// =============================================================================
// Tests
// =============================================================================
