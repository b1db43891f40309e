//! Per-entity action serialization.
//!
//! Each draft (and feed post) supports a set of mutually exclusive actions;
//! at most one may be in flight per entity at a time. The gate hands out
//! drop-released guards so the busy marker is cleared on success and failure
//! alike; no error path can leave an entity stuck busy.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::studio::api::DraftApi;
use crate::studio::types::{Draft, DraftPatch};

// =============================================================================
// ActionGate
// =============================================================================

/// Claim scoping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePolicy {
    /// One in-flight action per entity id; distinct ids proceed independently.
    PerEntity,
    /// A single shared token: any held claim blocks every id, so one busy
    /// draft disables actions on the whole list.
    Exclusive,
}

/// Tracks which entity ids currently have an action in flight.
///
/// Thread-safe: the inner set is behind a Mutex so concurrent commands can
/// claim and release without ordering assumptions.
pub struct ActionGate {
    policy: GatePolicy,
    busy: Mutex<HashSet<String>>,
}

impl ActionGate {
    pub fn new(policy: GatePolicy) -> Arc<Self> {
        Arc::new(Self {
            policy,
            busy: Mutex::new(HashSet::new()),
        })
    }

    pub fn per_entity() -> Arc<Self> {
        Self::new(GatePolicy::PerEntity)
    }

    pub fn exclusive() -> Arc<Self> {
        Self::new(GatePolicy::Exclusive)
    }

    /// Whether an action is currently in flight for `id` (under the claim
    /// policy; with `Exclusive`, any busy entity makes every id busy).
    pub fn is_busy(&self, id: &str) -> bool {
        let busy = self.busy.lock().unwrap();
        match self.policy {
            GatePolicy::PerEntity => busy.contains(id),
            GatePolicy::Exclusive => !busy.is_empty(),
        }
    }

    /// Atomically claim the gate for `id`. Fails with `AppError::Busy` when
    /// the claim is refused; the returned guard releases on drop.
    pub fn try_claim(self: &Arc<Self>, id: &str) -> Result<GateGuard, AppError> {
        let mut busy = self.busy.lock().unwrap();
        let blocked = match self.policy {
            GatePolicy::PerEntity => busy.contains(id),
            GatePolicy::Exclusive => !busy.is_empty(),
        };
        if blocked {
            return Err(AppError::Busy(format!(
                "an action is already in flight for '{id}'"
            )));
        }
        busy.insert(id.to_string());
        Ok(GateGuard {
            gate: self.clone(),
            id: id.to_string(),
        })
    }
}

/// Held for the duration of one action; releasing is unconditional via Drop.
pub struct GateGuard {
    gate: Arc<ActionGate>,
    id: String,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        let mut busy = self.gate.busy.lock().unwrap();
        busy.remove(&self.id);
    }
}

// =============================================================================
// Confirmation capability
// =============================================================================

/// Confirmation step the view layer provides to the core. Destructive actions
/// consult it before any request is dispatched.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Wraps an answer the UI already collected (the webview shows the prompt and
/// forwards the result over IPC).
pub struct Preconfirmed(pub bool);

impl Confirm for Preconfirmed {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

// =============================================================================
// DraftActions
// =============================================================================

/// The five gated operations on a single draft. Every call claims the gate
/// for the draft id, performs its round trip(s), and releases on settle; the
/// caller re-fetches the authoritative list afterwards.
pub struct DraftActions {
    api: Arc<dyn DraftApi>,
    gate: Arc<ActionGate>,
}

impl DraftActions {
    pub fn new(api: Arc<dyn DraftApi>, gate: Arc<ActionGate>) -> Self {
        Self { api, gate }
    }

    pub fn gate(&self) -> &Arc<ActionGate> {
        &self.gate
    }

    /// `draft → approved`, a one-way transition. The view layer hides the
    /// approve control for non-draft statuses; the server owns idempotency.
    pub async fn approve(&self, id: &str) -> Result<Draft, AppError> {
        let _guard = self.gate.try_claim(id)?;
        self.api.approve_draft(id).await
    }

    /// Delete after explicit confirmation. A declined prompt issues zero
    /// DELETE requests and reports `false`.
    pub async fn delete(&self, id: &str, confirm: &dyn Confirm) -> Result<bool, AppError> {
        if !confirm.confirm("Delete this draft?") {
            return Ok(false);
        }
        let _guard = self.gate.try_claim(id)?;
        self.api.delete_draft(id).await?;
        Ok(true)
    }

    pub async fn regenerate_caption(&self, id: &str) -> Result<Draft, AppError> {
        let _guard = self.gate.try_claim(id)?;
        self.api.regen_caption(id).await
    }

    /// Two strictly sequential round trips: persist the selected style, then
    /// trigger regeneration. Not atomic: a failure between them leaves the
    /// style patched and the image unregenerated.
    pub async fn regenerate_image(&self, id: &str, style: &str) -> Result<Draft, AppError> {
        let _guard = self.gate.try_claim(id)?;
        self.api
            .patch_draft(
                id,
                &DraftPatch {
                    image_style: Some(style.to_string()),
                    ..DraftPatch::default()
                },
            )
            .await?;
        self.api.regen_image(id).await
    }

    /// Export is a download navigation, not a fetch. The gate is claimed so
    /// the UI shows the draft busy while the shell opens the URL.
    pub fn export_url(&self, id: &str) -> Result<(GateGuard, String), AppError> {
        let guard = self.gate.try_claim(id)?;
        Ok((guard, self.api.export_url(id)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::types::*;
    use async_trait::async_trait;

    // ------------------------------------------------------------------
    // Gate mechanics
    // ------------------------------------------------------------------

    #[test]
    fn test_per_entity_claims_are_independent() {
        let gate = ActionGate::per_entity();
        let _a = gate.try_claim("d1").unwrap();
        // Same id is blocked, other ids are not.
        assert!(gate.try_claim("d1").is_err());
        let _b = gate.try_claim("d2").unwrap();
        assert!(gate.is_busy("d1"));
        assert!(gate.is_busy("d2"));
        assert!(!gate.is_busy("d3"));
    }

    #[test]
    fn test_exclusive_claim_blocks_unrelated_ids() {
        // The single-token policy: while draft X is busy, actions on any
        // draft Y != X are also blocked. Deliberate over-restriction.
        let gate = ActionGate::exclusive();
        let _a = gate.try_claim("d1").unwrap();
        assert!(matches!(gate.try_claim("d2"), Err(AppError::Busy(_))));
        assert!(gate.is_busy("d2"));
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let gate = ActionGate::per_entity();
        {
            let _g = gate.try_claim("d1").unwrap();
            assert!(gate.is_busy("d1"));
        }
        assert!(!gate.is_busy("d1"));
        // Reclaimable after release.
        let _g = gate.try_claim("d1").unwrap();
    }

    // ------------------------------------------------------------------
    // Draft actions against a recording fake
    // ------------------------------------------------------------------

    fn dummy_draft(id: &str, status: DraftStatus) -> Draft {
        Draft {
            id: id.to_string(),
            idea_id: None,
            title: "t".into(),
            category: Category::Lifestyle,
            caption: String::new(),
            hashtags: vec![],
            custom_text: None,
            persona_id: "p1".into(),
            image_style: None,
            status,
            preview_url: None,
            filename: None,
        }
    }

    /// Records the sequence of API calls; individual ops can be scripted to fail.
    #[derive(Default)]
    struct RecordingDrafts {
        calls: Mutex<Vec<String>>,
        fail_regen_image: bool,
    }

    impl RecordingDrafts {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DraftApi for RecordingDrafts {
        async fn list_ideas(&self) -> Result<Vec<Idea>, AppError> {
            Ok(vec![])
        }
        async fn list_drafts(&self) -> Result<Vec<Draft>, AppError> {
            Ok(vec![])
        }
        async fn create_draft(&self, body: &CreateDraftBody) -> Result<Draft, AppError> {
            self.record(format!("create:{}", body.title));
            Ok(dummy_draft("new", DraftStatus::Draft))
        }
        async fn patch_draft(&self, id: &str, patch: &DraftPatch) -> Result<Draft, AppError> {
            self.record(format!(
                "patch:{}:{}",
                id,
                patch.image_style.as_deref().unwrap_or("-")
            ));
            Ok(dummy_draft(id, DraftStatus::Draft))
        }
        async fn approve_draft(&self, id: &str) -> Result<Draft, AppError> {
            self.record(format!("approve:{id}"));
            Ok(dummy_draft(id, DraftStatus::Approved))
        }
        async fn delete_draft(&self, id: &str) -> Result<(), AppError> {
            self.record(format!("delete:{id}"));
            Ok(())
        }
        async fn regen_caption(&self, id: &str) -> Result<Draft, AppError> {
            self.record(format!("regen_caption:{id}"));
            Ok(dummy_draft(id, DraftStatus::Draft))
        }
        async fn regen_image(&self, id: &str) -> Result<Draft, AppError> {
            self.record(format!("regen_image:{id}"));
            if self.fail_regen_image {
                return Err(AppError::Api("503: image backend down".into()));
            }
            Ok(dummy_draft(id, DraftStatus::Draft))
        }
        fn export_url(&self, id: &str) -> String {
            format!("http://test/api/drafts/{id}/export")
        }
    }

    fn actions(api: RecordingDrafts) -> (DraftActions, Arc<RecordingDrafts>) {
        let api = Arc::new(api);
        (
            DraftActions::new(api.clone(), ActionGate::per_entity()),
            api,
        )
    }

    #[tokio::test]
    async fn test_approve_transitions_status() {
        let (actions, api) = actions(RecordingDrafts::default());
        let d = actions.approve("d1").await.unwrap();
        assert_eq!(d.status, DraftStatus::Approved);
        assert_eq!(api.calls(), vec!["approve:d1"]);
        // Gate released after settle.
        assert!(!actions.gate().is_busy("d1"));
    }

    #[tokio::test]
    async fn test_regenerate_image_patches_style_first() {
        let (actions, api) = actions(RecordingDrafts::default());
        actions.regenerate_image("d1", "neon").await.unwrap();
        // Patch must precede regeneration, in that order.
        assert_eq!(api.calls(), vec!["patch:d1:neon", "regen_image:d1"]);
    }

    #[tokio::test]
    async fn test_regenerate_image_failure_still_releases_gate() {
        let (actions, api) = actions(RecordingDrafts {
            fail_regen_image: true,
            ..Default::default()
        });
        let err = actions.regenerate_image("d1", "neon").await.unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
        // Style was patched before the failure; no compensation happens.
        assert_eq!(api.calls(), vec!["patch:d1:neon", "regen_image:d1"]);
        assert!(!actions.gate().is_busy("d1"));
    }

    #[tokio::test]
    async fn test_declined_confirmation_issues_no_delete() {
        let (actions, api) = actions(RecordingDrafts::default());
        let deleted = actions.delete("d1", &Preconfirmed(false)).await.unwrap();
        assert!(!deleted);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_issues_one_delete() {
        let (actions, api) = actions(RecordingDrafts::default());
        let deleted = actions.delete("d1", &Preconfirmed(true)).await.unwrap();
        assert!(deleted);
        assert_eq!(api.calls(), vec!["delete:d1"]);
    }

    #[tokio::test]
    async fn test_busy_draft_rejects_second_action() {
        let (actions, _) = actions(RecordingDrafts::default());
        let _held = actions.gate().try_claim("d1").unwrap();
        let err = actions.regenerate_caption("d1").await.unwrap_err();
        assert!(matches!(err, AppError::Busy(_)));
    }

    #[tokio::test]
    async fn test_export_claims_gate_and_builds_url() {
        let (actions, _) = actions(RecordingDrafts::default());
        let (guard, url) = actions.export_url("d1").unwrap();
        assert_eq!(url, "http://test/api/drafts/d1/export");
        assert!(actions.gate().is_busy("d1"));
        drop(guard);
        assert!(!actions.gate().is_busy("d1"));
    }
}
