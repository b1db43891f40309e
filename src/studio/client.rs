use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StudioConfig;
use crate::error::AppError;
use crate::studio::api::{DraftApi, FeedApi, TrendsApi};
use crate::studio::types::*;

// ============================================================================
// Helper
// ============================================================================

/// Convert any displayable error into `AppError::Api`.
fn api_err(e: impl std::fmt::Display) -> AppError {
    AppError::Api(e.to_string())
}

// ============================================================================
// StudioClient
// ============================================================================

/// HTTP client wrapping every studio service endpoint.
///
/// Non-2xx responses are treated uniformly as failures; the status line and
/// response body become the error message. No retries here: the trend
/// resolver's staged fallback is the only retry-like behavior in the app,
/// and it lives in the orchestrator, not the transport.
pub struct StudioClient {
    http: reqwest::Client,
    base_url: String,
}

impl StudioClient {
    /// Create a new `StudioClient` against the configured base URL.
    ///
    /// The underlying `reqwest::Client` is configured with a 30-second timeout.
    pub fn new(config: &StudioConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url: config.base_url.clone(),
        }
    }

    // --------------------------------------------------------------------
    // Private HTTP helpers
    // --------------------------------------------------------------------

    /// Build a request to the given API path (relative to `/api`).
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/api{}", self.base_url, path))
    }

    /// Send a request, check the status code, and deserialize the JSON response.
    /// On a non-2xx status the body text is folded into the error.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let resp = req.send().await.map_err(api_err)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Api(format!("{}: {}", status, body)));
        }
        resp.json().await.map_err(api_err)
    }

    /// Send a request, check the status code, and discard the response body.
    async fn send_ok(&self, req: reqwest::RequestBuilder) -> Result<(), AppError> {
        let resp = req.send().await.map_err(api_err)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Api(format!("{}: {}", status, body)));
        }
        Ok(())
    }

    /// POST a JSON body and deserialize the response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let req = self.request(reqwest::Method::POST, path).json(body);
        self.send_json(req).await
    }

    /// Build the multipart form shared by persona and character creation.
    fn portrait_form(portrait: &PortraitUpload) -> reqwest::multipart::Form {
        let part = reqwest::multipart::Part::bytes(portrait.bytes.clone())
            .file_name(portrait.filename.clone());
        reqwest::multipart::Form::new().part("file", part)
    }

    // --------------------------------------------------------------------
    // Health & analytics
    // --------------------------------------------------------------------

    /// `GET /api/healthz`: service liveness. Payload shape is not ours to pin.
    pub async fn health(&self) -> Result<serde_json::Value, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/healthz"))
            .await
    }

    /// `GET /api/analytics`: draft/feed aggregates for the charts view.
    pub async fn analytics(&self) -> Result<AnalyticsSummary, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/analytics"))
            .await
    }

    // --------------------------------------------------------------------
    // Personas
    // --------------------------------------------------------------------

    /// `GET /api/personas`
    pub async fn list_personas(&self) -> Result<Vec<Persona>, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/personas"))
            .await
    }

    /// `POST /api/personas`: multipart create with a mandatory portrait file.
    pub async fn create_persona(&self, input: &CreatePersonaInput) -> Result<Persona, AppError> {
        let mut form = Self::portrait_form(&input.portrait)
            .text("name", input.name.clone())
            .text("style", input.style.clone())
            .text("mood", input.mood.clone())
            .text("bg", input.bg.clone());
        if let Some(hint) = &input.identity_hint {
            form = form.text("identityHint", hint.clone());
        }
        let req = self
            .request(reqwest::Method::POST, "/personas")
            .multipart(form);
        self.send_json(req).await
    }

    /// `PATCH /api/personas/{id}`: textual/visual meta only, no image swap.
    pub async fn patch_persona(&self, id: &str, patch: &PersonaPatch) -> Result<Persona, AppError> {
        let path = format!("/personas/{}", urlencoding::encode(id));
        let req = self.request(reqwest::Method::PATCH, &path).json(patch);
        self.send_json(req).await
    }

    /// `DELETE /api/personas/{id}`
    pub async fn delete_persona(&self, id: &str) -> Result<(), AppError> {
        let path = format!("/personas/{}", urlencoding::encode(id));
        self.send_ok(self.request(reqwest::Method::DELETE, &path))
            .await
    }

    // --------------------------------------------------------------------
    // Characters
    // --------------------------------------------------------------------

    /// `GET /api/characters`
    pub async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/characters"))
            .await
    }

    /// `POST /api/characters`: multipart create with an image file.
    pub async fn create_character(
        &self,
        input: &CreateCharacterInput,
    ) -> Result<Character, AppError> {
        let mut form = Self::portrait_form(&input.portrait).text("name", input.name.clone());
        if let Some(pid) = &input.persona_id {
            form = form.text("personaId", pid.clone());
        }
        let req = self
            .request(reqwest::Method::POST, "/characters")
            .multipart(form);
        self.send_json(req).await
    }

    /// `PATCH /api/characters/{id}`
    pub async fn patch_character(
        &self,
        id: &str,
        patch: &CharacterPatch,
    ) -> Result<Character, AppError> {
        let path = format!("/characters/{}", urlencoding::encode(id));
        let req = self.request(reqwest::Method::PATCH, &path).json(patch);
        self.send_json(req).await
    }

    /// `DELETE /api/characters/{id}`
    pub async fn delete_character(&self, id: &str) -> Result<(), AppError> {
        let path = format!("/characters/{}", urlencoding::encode(id));
        self.send_ok(self.request(reqwest::Method::DELETE, &path))
            .await
    }
}

// ============================================================================
// Trait implementations consumed by the orchestrator
// ============================================================================

#[async_trait]
impl TrendsApi for StudioClient {
    /// `GET /api/trends?geo=&window=`
    async fn trends_query(&self, geo: &str, window: &str) -> Result<TrendsResponse, AppError> {
        let req = self
            .request(reqwest::Method::GET, "/trends")
            .query(&[("geo", geo), ("window", window)]);
        self.send_json(req).await
    }

    /// `GET /api/trends/{geo}/{window}`
    async fn trends_path(&self, geo: &str, window: &str) -> Result<TrendsResponse, AppError> {
        let path = format!(
            "/trends/{}/{}",
            urlencoding::encode(geo),
            urlencoding::encode(window)
        );
        self.send_json(self.request(reqwest::Method::GET, &path))
            .await
    }
}

#[async_trait]
impl DraftApi for StudioClient {
    /// `GET /api/ideas`
    async fn list_ideas(&self) -> Result<Vec<Idea>, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/ideas"))
            .await
    }

    /// `GET /api/drafts`
    async fn list_drafts(&self) -> Result<Vec<Draft>, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/drafts"))
            .await
    }

    /// `POST /api/drafts`
    async fn create_draft(&self, body: &CreateDraftBody) -> Result<Draft, AppError> {
        self.post_json("/drafts", body).await
    }

    /// `PATCH /api/drafts/{id}`
    async fn patch_draft(&self, id: &str, patch: &DraftPatch) -> Result<Draft, AppError> {
        let path = format!("/drafts/{}", urlencoding::encode(id));
        let req = self.request(reqwest::Method::PATCH, &path).json(patch);
        self.send_json(req).await
    }

    /// `POST /api/drafts/{id}/approve`
    async fn approve_draft(&self, id: &str) -> Result<Draft, AppError> {
        let path = format!("/drafts/{}/approve", urlencoding::encode(id));
        self.send_json(self.request(reqwest::Method::POST, &path))
            .await
    }

    /// `DELETE /api/drafts/{id}`
    async fn delete_draft(&self, id: &str) -> Result<(), AppError> {
        let path = format!("/drafts/{}", urlencoding::encode(id));
        self.send_ok(self.request(reqwest::Method::DELETE, &path))
            .await
    }

    /// `POST /api/drafts/{id}/regen_caption`
    async fn regen_caption(&self, id: &str) -> Result<Draft, AppError> {
        let path = format!("/drafts/{}/regen_caption", urlencoding::encode(id));
        self.send_json(self.request(reqwest::Method::POST, &path))
            .await
    }

    /// `POST /api/drafts/{id}/regen_image`
    async fn regen_image(&self, id: &str) -> Result<Draft, AppError> {
        let path = format!("/drafts/{}/regen_image", urlencoding::encode(id));
        self.send_json(self.request(reqwest::Method::POST, &path))
            .await
    }

    /// `GET /api/drafts/{id}/export`: consumed via navigation, not fetch.
    fn export_url(&self, id: &str) -> String {
        format!(
            "{}/api/drafts/{}/export",
            self.base_url,
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl FeedApi for StudioClient {
    /// `GET /api/feed`
    async fn feed(&self) -> Result<FeedResponse, AppError> {
        self.send_json(self.request(reqwest::Method::GET, "/feed"))
            .await
    }

    /// `DELETE /api/feed/{id}`
    async fn delete_feed_post(&self, id: &str) -> Result<(), AppError> {
        let path = format!("/feed/{}", urlencoding::encode(id));
        self.send_ok(self.request(reqwest::Method::DELETE, &path))
            .await
    }

    /// `POST /api/agent/critique/{postId}`
    async fn critique(&self, post_id: &str) -> Result<AgentReport, AppError> {
        let path = format!("/agent/critique/{}", urlencoding::encode(post_id));
        self.send_json(self.request(reqwest::Method::POST, &path))
            .await
    }

    /// `GET /api/agent/insights/{postId}`: read back a stored critique.
    async fn agent_insights(&self, post_id: &str) -> Result<AgentReport, AppError> {
        let path = format!("/agent/insights/{}", urlencoding::encode(post_id));
        self.send_json(self.request(reqwest::Method::GET, &path))
            .await
    }

    /// `POST /api/agent/apply/{postId}`: spawns a new draft from the critique.
    async fn apply_recommendations(&self, post_id: &str) -> Result<Draft, AppError> {
        let path = format!("/agent/apply/{}", urlencoding::encode(post_id));
        self.send_json(self.request(reqwest::Method::POST, &path))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StudioClient {
        StudioClient::new(&StudioConfig {
            base_url: "http://studio.local:8000".into(),
            trends_geo: "HU".into(),
            trends_window: "90d".into(),
        })
    }

    #[test]
    fn test_export_url_shape() {
        let c = client();
        assert_eq!(
            c.export_url("abc123"),
            "http://studio.local:8000/api/drafts/abc123/export"
        );
    }

    #[test]
    fn test_export_url_encodes_id() {
        let c = client();
        assert_eq!(
            c.export_url("a b/c"),
            "http://studio.local:8000/api/drafts/a%20b%2Fc/export"
        );
    }
}
