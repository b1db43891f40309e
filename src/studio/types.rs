//! Wire types for the studio service.
//!
//! One canonical schema: camelCase on the wire, exported to TypeScript for
//! the webview. The service mints all ids; the client never fabricates them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Drafts & ideas
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Workout,
    Meal,
    Lifestyle,
}

impl Default for Category {
    fn default() -> Self {
        Category::Lifestyle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Draft,
    Approved,
}

/// A suggested topic, precursor to a draft. Read-only from the client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub category: Category,
}

/// An unpublished candidate post. `status` only ever moves draft → approved.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    #[serde(default)]
    pub idea_id: Option<String>,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub custom_text: Option<String>,
    pub persona_id: String,
    #[serde(default)]
    pub image_style: Option<String>,
    pub status: DraftStatus,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl Draft {
    /// Whether the approve control is offered. Approval is one-way; once a
    /// fetched draft reports `approved`, the control disappears and the
    /// action cannot be re-invoked without a fetch showing `draft` again.
    pub fn can_approve(&self) -> bool {
        self.status == DraftStatus::Draft
    }
}

/// Body of `POST /api/drafts`. Caption and hashtags are left empty so the
/// service fills them during generation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftBody {
    pub idea_id: Option<String>,
    pub title: String,
    pub category: Category,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub custom_text: Option<String>,
    pub persona_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_style: Option<String>,
}

/// Partial update for `PATCH /api/drafts/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_style: Option<String>,
}

// ============================================================================
// Trends
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    #[serde(default)]
    pub geo: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
}

// ============================================================================
// Feed & agent
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PostMetrics {
    pub impressions: u64,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
}

/// Critique produced by the analytics agent. Absent on a post until
/// `POST /api/agent/critique/{id}` has run.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AgentReport {
    pub score: u32,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A published draft in the simulated feed. Metrics are server-owned and
/// read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub metrics: PostMetrics,
    #[serde(default)]
    pub agent: Option<AgentReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[serde(default)]
    pub items: Vec<FeedPost>,
}

// ============================================================================
// Personas & characters
// ============================================================================

/// A reusable identity/style/tone profile with a reference portrait.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ref_image_url: Option<String>,
    #[serde(default)]
    pub identity_hint: Option<String>,
    pub style: String,
    pub mood: String,
    pub bg: String,
}

/// Multipart creation input: the portrait upload is mandatory.
#[derive(Debug, Clone)]
pub struct CreatePersonaInput {
    pub name: String,
    pub identity_hint: Option<String>,
    pub style: String,
    pub mood: String,
    pub bg: String,
    pub portrait: PortraitUpload,
}

#[derive(Debug, Clone)]
pub struct PortraitUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
}

/// Lightweight persona-like entity, optionally bound to a persona.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCharacterInput {
    pub name: String,
    pub persona_id: Option<String>,
    pub portrait: PortraitUpload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    pub day: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total: u64,
    #[serde(default)]
    pub by_category: Vec<CategoryCount>,
    #[serde(default)]
    pub by_status: Vec<StatusCount>,
    #[serde(default)]
    pub per_day: Vec<DayCount>,
}
