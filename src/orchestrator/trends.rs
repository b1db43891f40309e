//! Trend resolution with staged fallback.
//!
//! The trend source is volatile: the primary endpoint rate-limits, the legacy
//! route may be the only one deployed, and the UI must never show an empty
//! keyword list. The resolver tries an explicit ordered chain of sources and
//! stops at the first non-empty result; every stage failure is swallowed and
//! logged, never surfaced to the caller.

use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::studio::api::TrendsApi;

// =============================================================================
// Constants
// =============================================================================

/// Local seed keywords, used only when every remote stage fails or comes back
/// empty. Order matters: the UI shows them as ranked.
pub const SEED_KEYWORDS: &[&str] = &[
    "AI tools for students",
    "thesis writing tips",
    "time management",
    "note-taking apps",
    "study motivation",
    "latest AI trends",
    "blockchain news",
    "startup ideas",
    "green tech",
    "digital marketing",
    "budget travel",
    "hidden gems Europe",
    "remote work lifestyle",
    "coffee culture",
    "local food experiences",
    "mental health awareness",
    "sustainable fashion",
    "personal branding",
    "career change",
    "work-life balance",
];

/// Maximum number of seed entries handed to the UI.
pub const SEED_LIMIT: usize = 20;

// =============================================================================
// Source chain
// =============================================================================

/// One stage of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TrendSource {
    /// Query-parameter form of the trend endpoint.
    QueryParams,
    /// Path-parameter form (legacy/alternate server route).
    PathParams,
    /// Hardcoded local seed list.
    LocalSeed,
}

/// The ordered chain, tried front to back.
fn source_chain() -> [TrendSource; 3] {
    [
        TrendSource::QueryParams,
        TrendSource::PathParams,
        TrendSource::LocalSeed,
    ]
}

/// Resolver output: the keywords plus which source produced them, so the UI
/// can badge degraded results and the logs can tell the stages apart.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTrends {
    pub keywords: Vec<String>,
    pub source: TrendSource,
}

// =============================================================================
// TrendResolver
// =============================================================================

pub struct TrendResolver {
    api: Arc<dyn TrendsApi>,
}

impl TrendResolver {
    pub fn new(api: Arc<dyn TrendsApi>) -> Self {
        Self { api }
    }

    /// Resolve a ranked keyword list. Infallible and never empty: the seed
    /// stage cannot fail, so the caller gets selectable options even when the
    /// service is unreachable.
    pub async fn resolve(&self, geo: &str, window: &str) -> ResolvedTrends {
        for source in source_chain() {
            match self.try_source(source, geo, window).await {
                Ok(keywords) if !keywords.is_empty() => {
                    tracing::debug!(?source, count = keywords.len(), "trends resolved");
                    return ResolvedTrends { keywords, source };
                }
                Ok(_) => {
                    tracing::debug!(?source, "trend source returned no keywords, trying next");
                }
                Err(e) => {
                    tracing::debug!(?source, error = %e, "trend source failed, trying next");
                }
            }
        }

        // Unreachable: LocalSeed always yields a non-empty list. Kept as a
        // hard fallback so a future chain edit cannot break the contract.
        ResolvedTrends {
            keywords: seed_keywords(),
            source: TrendSource::LocalSeed,
        }
    }

    async fn try_source(
        &self,
        source: TrendSource,
        geo: &str,
        window: &str,
    ) -> Result<Vec<String>, crate::error::AppError> {
        match source {
            TrendSource::QueryParams => {
                Ok(self.api.trends_query(geo, window).await?.keywords)
            }
            TrendSource::PathParams => Ok(self.api.trends_path(geo, window).await?.keywords),
            TrendSource::LocalSeed => {
                tracing::warn!("using local seed trends fallback");
                Ok(seed_keywords())
            }
        }
    }
}

/// The seed list truncated to [`SEED_LIMIT`], in seed order.
pub fn seed_keywords() -> Vec<String> {
    SEED_KEYWORDS
        .iter()
        .take(SEED_LIMIT)
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::studio::types::TrendsResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Scripted trends API: each endpoint either errors or returns a fixed
    /// keyword list, and counts how often it was hit.
    struct ScriptedTrends {
        query: Result<Vec<String>, String>,
        path: Result<Vec<String>, String>,
        query_calls: AtomicU32,
        path_calls: AtomicU32,
    }

    impl ScriptedTrends {
        fn new(query: Result<Vec<String>, String>, path: Result<Vec<String>, String>) -> Self {
            Self {
                query,
                path,
                query_calls: AtomicU32::new(0),
                path_calls: AtomicU32::new(0),
            }
        }

        fn response(
            script: &Result<Vec<String>, String>,
        ) -> Result<TrendsResponse, AppError> {
            match script {
                Ok(keywords) => Ok(TrendsResponse {
                    geo: None,
                    window: None,
                    keywords: keywords.clone(),
                    fetched_at: None,
                }),
                Err(msg) => Err(AppError::Api(msg.clone())),
            }
        }
    }

    #[async_trait]
    impl TrendsApi for ScriptedTrends {
        async fn trends_query(&self, _: &str, _: &str) -> Result<TrendsResponse, AppError> {
            self.query_calls.fetch_add(1, Ordering::SeqCst);
            Self::response(&self.query)
        }

        async fn trends_path(&self, _: &str, _: &str) -> Result<TrendsResponse, AppError> {
            self.path_calls.fetch_add(1, Ordering::SeqCst);
            Self::response(&self.path)
        }
    }

    fn resolver(api: ScriptedTrends) -> (TrendResolver, Arc<ScriptedTrends>) {
        let api = Arc::new(api);
        (TrendResolver::new(api.clone()), api)
    }

    #[tokio::test]
    async fn test_query_form_short_circuits() {
        let (r, api) = resolver(ScriptedTrends::new(
            Ok(vec!["alpha".into(), "beta".into()]),
            Ok(vec!["never".into()]),
        ));
        let out = r.resolve("HU", "90d").await;
        assert_eq!(out.source, TrendSource::QueryParams);
        assert_eq!(out.keywords, vec!["alpha", "beta"]);
        // The path form must never be called when the query form succeeds.
        assert_eq!(api.path_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_path_form_on_empty_query() {
        let (r, api) = resolver(ScriptedTrends::new(
            Ok(vec![]),
            Ok(vec!["gamma".into()]),
        ));
        let out = r.resolve("HU", "90d").await;
        assert_eq!(out.source, TrendSource::PathParams);
        assert_eq!(out.keywords, vec!["gamma"]);
        assert_eq!(api.query_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.path_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_path_form_on_transport_error() {
        let (r, _) = resolver(ScriptedTrends::new(
            Err("connection refused".into()),
            Ok(vec!["gamma".into()]),
        ));
        let out = r.resolve("HU", "90d").await;
        assert_eq!(out.source, TrendSource::PathParams);
    }

    #[tokio::test]
    async fn test_seed_when_query_empty_and_path_errors() {
        let (r, _) = resolver(ScriptedTrends::new(
            Ok(vec![]),
            Err("500 Internal Server Error".into()),
        ));
        let out = r.resolve("HU", "90d").await;
        assert_eq!(out.source, TrendSource::LocalSeed);
        // Exactly the first 20 seed entries, in seed order.
        assert_eq!(out.keywords, seed_keywords());
        assert_eq!(out.keywords.len(), SEED_LIMIT);
        assert_eq!(out.keywords[0], "AI tools for students");
        assert_eq!(out.keywords[19], "work-life balance");
    }

    #[tokio::test]
    async fn test_seed_when_both_remote_stages_error() {
        let (r, api) = resolver(ScriptedTrends::new(
            Err("dns failure".into()),
            Err("dns failure".into()),
        ));
        let out = r.resolve("HU", "90d").await;
        assert_eq!(out.source, TrendSource::LocalSeed);
        assert!(!out.keywords.is_empty());
        assert_eq!(api.query_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.path_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_seed_list_is_capped() {
        assert!(seed_keywords().len() <= SEED_LIMIT);
    }
}
