use std::sync::Arc;

use tauri::State;

use crate::orchestrator::trends::ResolvedTrends;
use crate::AppState;

/// Resolve the ranked keyword list for the dashboard. Never errors: the
/// resolver degrades through its fallback chain down to the local seed.
#[tauri::command]
pub async fn resolve_trends(
    state: State<'_, Arc<AppState>>,
    geo: Option<String>,
    window: Option<String>,
) -> Result<ResolvedTrends, crate::error::AppError> {
    let geo = geo.unwrap_or_else(|| state.config.trends_geo.clone());
    let window = window.unwrap_or_else(|| state.config.trends_window.clone());
    Ok(state.resolver.resolve(&geo, &window).await)
}
