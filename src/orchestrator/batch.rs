//! Batch draft generation.
//!
//! Expands a keyword selection into one draft-creation request per keyword,
//! all sharing the same persona, style, and freeform text. Requests are
//! dispatched as a concurrent fan-out with no ordering guarantees; each
//! failure is surfaced with its keyword and response body. There is no
//! rollback of already-created drafts on partial failure.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AppError;
use crate::studio::api::DraftApi;
use crate::studio::types::{Category, CreateDraftBody, Draft};

/// Category assigned to keyword-generated drafts.
const DEFAULT_CATEGORY: Category = Category::Lifestyle;

// =============================================================================
// Request / report
// =============================================================================

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Selected trend keywords. Deduplicated preserving selection order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Freeform text (tone, angle, notes) annotated on every request. When
    /// the selection is empty, a non-blank text becomes the sole keyword.
    #[serde(default)]
    pub custom_text: String,
    /// Mandatory: drafts cannot be generated without a persona portrait.
    pub persona_id: String,
    #[serde(default)]
    pub image_style: Option<String>,
}

/// One failed creation request.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub keyword: String,
    pub error: String,
}

/// Outcome at individual-request granularity. `created` holds the drafts
/// that did get made even when other requests failed; the server keeps
/// them (no compensation), and the UI re-fetch will show them.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub created: Vec<Draft>,
    pub failures: Vec<BatchFailure>,
}

// =============================================================================
// Generator
// =============================================================================

pub struct BatchGenerator {
    api: Arc<dyn DraftApi>,
}

impl BatchGenerator {
    pub fn new(api: Arc<dyn DraftApi>) -> Self {
        Self { api }
    }

    /// Fan out one creation request per effective keyword.
    ///
    /// Validation failures (missing persona, nothing to generate) are raised
    /// before any request is sent. When at least one request fails, the call
    /// errs with a per-keyword report; partial successes stand.
    pub async fn generate(&self, request: &BatchRequest) -> Result<BatchReport, AppError> {
        if request.persona_id.trim().is_empty() {
            return Err(AppError::Validation(
                "personaId is required to generate drafts".into(),
            ));
        }

        let keywords = effective_keywords(&request.keywords, &request.custom_text);
        if keywords.is_empty() {
            return Err(AppError::Validation(
                "select at least one keyword or enter custom text".into(),
            ));
        }

        let custom_text = normalized_text(&request.custom_text);
        let bodies: Vec<CreateDraftBody> = keywords
            .iter()
            .map(|kw| CreateDraftBody {
                idea_id: None,
                title: kw.clone(),
                category: DEFAULT_CATEGORY,
                caption: String::new(),
                hashtags: Vec::new(),
                custom_text: custom_text.clone(),
                persona_id: request.persona_id.clone(),
                image_style: request.image_style.clone(),
            })
            .collect();

        tracing::info!(
            count = bodies.len(),
            persona = %request.persona_id,
            "dispatching draft generation batch"
        );

        // Concurrent fan-out; completion order is not assumed anywhere.
        let results = join_all(bodies.iter().map(|b| self.api.create_draft(b))).await;

        let mut report = BatchReport {
            created: Vec::new(),
            failures: Vec::new(),
        };
        for (keyword, result) in keywords.into_iter().zip(results) {
            match result {
                Ok(draft) => report.created.push(draft),
                Err(e) => {
                    tracing::warn!(keyword = %keyword, error = %e, "draft creation failed");
                    report.failures.push(BatchFailure {
                        keyword,
                        error: e.to_string(),
                    });
                }
            }
        }

        if report.failures.is_empty() {
            Ok(report)
        } else {
            let detail = report
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.keyword, f.error))
                .collect::<Vec<_>>()
                .join("; ");
            Err(AppError::Api(format!(
                "{} of {} draft requests failed: {}",
                report.failures.len(),
                report.failures.len() + report.created.len(),
                detail
            )))
        }
    }
}

/// Deduplicate the selection preserving order; fall back to the trimmed
/// custom text as the sole keyword when nothing is selected.
pub fn effective_keywords(selected: &[String], custom_text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords: Vec<String> = selected
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_string()))
        .map(|k| k.to_string())
        .collect();

    if keywords.is_empty() {
        let text = custom_text.trim();
        if !text.is_empty() {
            keywords.push(text.to_string());
        }
    }
    keywords
}

fn normalized_text(custom_text: &str) -> Option<String> {
    let text = custom_text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
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
    use std::sync::Mutex;

    /// Captures every creation body; keywords listed in `fail` are rejected
    /// with a body-carrying error, like a real 4xx/5xx response.
    #[derive(Default)]
    struct CapturingDrafts {
        bodies: Mutex<Vec<CreateDraftBody>>,
        fail: Vec<String>,
        deletes: Mutex<u32>,
    }

    #[async_trait]
    impl DraftApi for CapturingDrafts {
        async fn list_ideas(&self) -> Result<Vec<Idea>, AppError> {
            Ok(vec![])
        }
        async fn list_drafts(&self) -> Result<Vec<Draft>, AppError> {
            Ok(vec![])
        }
        async fn create_draft(&self, body: &CreateDraftBody) -> Result<Draft, AppError> {
            self.bodies.lock().unwrap().push(body.clone());
            if self.fail.contains(&body.title) {
                return Err(AppError::Api(format!(
                    "400 Bad Request: persona portrait not found for '{}'",
                    body.title
                )));
            }
            Ok(Draft {
                id: format!("d-{}", body.title),
                idea_id: None,
                title: body.title.clone(),
                category: body.category,
                caption: String::new(),
                hashtags: vec![],
                custom_text: body.custom_text.clone(),
                persona_id: body.persona_id.clone(),
                image_style: body.image_style.clone(),
                status: DraftStatus::Draft,
                preview_url: None,
                filename: None,
            })
        }
        async fn patch_draft(&self, _: &str, _: &DraftPatch) -> Result<Draft, AppError> {
            unreachable!("batch generation never patches")
        }
        async fn approve_draft(&self, _: &str) -> Result<Draft, AppError> {
            unreachable!()
        }
        async fn delete_draft(&self, _: &str) -> Result<(), AppError> {
            *self.deletes.lock().unwrap() += 1;
            Ok(())
        }
        async fn regen_caption(&self, _: &str) -> Result<Draft, AppError> {
            unreachable!()
        }
        async fn regen_image(&self, _: &str) -> Result<Draft, AppError> {
            unreachable!()
        }
        fn export_url(&self, id: &str) -> String {
            format!("http://test/api/drafts/{id}/export")
        }
    }

    fn generator(api: CapturingDrafts) -> (BatchGenerator, Arc<CapturingDrafts>) {
        let api = Arc::new(api);
        (BatchGenerator::new(api.clone()), api)
    }

    fn request(keywords: &[&str]) -> BatchRequest {
        BatchRequest {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            custom_text: "upbeat, short".into(),
            persona_id: "p1".into(),
            image_style: Some("clean".into()),
        }
    }

    #[tokio::test]
    async fn test_one_request_per_keyword_with_shared_fields() {
        let (g, api) = generator(CapturingDrafts::default());
        let report = g
            .generate(&request(&["leg day", "meal prep", "rest walk"]))
            .await
            .unwrap();
        assert_eq!(report.created.len(), 3);

        let bodies = api.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 3);
        for body in bodies.iter() {
            assert_eq!(body.persona_id, "p1");
            assert_eq!(body.custom_text.as_deref(), Some("upbeat, short"));
            assert_eq!(body.image_style.as_deref(), Some("clean"));
            assert_eq!(body.category, Category::Lifestyle);
            assert!(body.caption.is_empty());
            assert!(body.hashtags.is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_persona_sends_nothing() {
        let (g, api) = generator(CapturingDrafts::default());
        let mut req = request(&["leg day"]);
        req.persona_id = "  ".into();
        let err = g.generate(&req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(api.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_selection_uses_custom_text_as_keyword() {
        let (g, api) = generator(CapturingDrafts::default());
        let mut req = request(&[]);
        req.custom_text = "  coffee culture deep dive  ".into();
        g.generate(&req).await.unwrap();
        let bodies = api.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].title, "coffee culture deep dive");
    }

    #[tokio::test]
    async fn test_nothing_to_generate_is_a_validation_error() {
        let (g, api) = generator(CapturingDrafts::default());
        let mut req = request(&[]);
        req.custom_text = "   ".into();
        assert!(matches!(
            g.generate(&req).await,
            Err(AppError::Validation(_))
        ));
        assert!(api.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_keywords_collapse() {
        let (g, api) = generator(CapturingDrafts::default());
        g.generate(&request(&["a", "b", "a", " b ", "c"]))
            .await
            .unwrap();
        let titles: Vec<String> = api
            .bodies
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.title.clone())
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_partial_failure_reports_keyword_and_body_without_rollback() {
        let (g, api) = generator(CapturingDrafts {
            fail: vec!["meal prep".into()],
            ..Default::default()
        });
        let err = g
            .generate(&request(&["leg day", "meal prep", "rest walk"]))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 of 3"));
        assert!(msg.contains("meal prep"));
        assert!(msg.contains("400 Bad Request"));
        // All three were dispatched; the successes are not rolled back.
        assert_eq!(api.bodies.lock().unwrap().len(), 3);
        assert_eq!(*api.deletes.lock().unwrap(), 0);
    }
}
