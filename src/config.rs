//! Studio service configuration.
//!
//! The remote base URL and default trend query parameters come from the
//! environment (with `.env` support for local dev). There is no secret
//! material here, so plain env vars are enough.

use crate::error::AppError;

/// Default service address when nothing is configured (local dev server).
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default trend geography / time window, matching the server defaults.
const DEFAULT_TRENDS_GEO: &str = "HU";
const DEFAULT_TRENDS_WINDOW: &str = "90d";

#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Base URL of the studio service, without a trailing slash.
    pub base_url: String,
    /// Geography code passed to the trend endpoints.
    pub trends_geo: String,
    /// Time window passed to the trend endpoints (`7d` | `30d` | `90d`).
    pub trends_window: String,
}

impl StudioConfig {
    /// Load configuration from the environment.
    ///
    /// `STUDIO_API_URL` must parse as an http(s) URL when set; a malformed
    /// value is a hard error rather than a silent fallback.
    pub fn from_env() -> Result<Self, AppError> {
        // Best-effort .env load; absence is fine.
        let _ = dotenvy::dotenv();

        let base_url = match std::env::var("STUDIO_API_URL") {
            Ok(raw) => {
                let parsed = url::Url::parse(&raw)
                    .map_err(|e| AppError::Validation(format!("STUDIO_API_URL invalid: {e}")))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::Validation(format!(
                        "STUDIO_API_URL must be http(s), got scheme '{}'",
                        parsed.scheme()
                    )));
                }
                raw.trim_end_matches('/').to_string()
            }
            Err(_) => DEFAULT_BASE_URL.to_string(),
        };

        let trends_geo =
            std::env::var("STUDIO_TRENDS_GEO").unwrap_or_else(|_| DEFAULT_TRENDS_GEO.to_string());
        let trends_window = std::env::var("STUDIO_TRENDS_WINDOW")
            .unwrap_or_else(|_| DEFAULT_TRENDS_WINDOW.to_string());

        Ok(Self {
            base_url,
            trends_geo,
            trends_window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Not setting the vars in-process; rely on them being absent in CI.
        if std::env::var("STUDIO_API_URL").is_ok() {
            return;
        }
        let cfg = StudioConfig::from_env().unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.trends_geo, "HU");
        assert_eq!(cfg.trends_window, "90d");
    }
}
