use std::sync::Arc;

use tauri::State;

use crate::error::AppError;
use crate::studio::types::AnalyticsSummary;
use crate::AppState;

/// `GET /api/healthz` round trip: lets the UI show service reachability.
#[tauri::command]
pub async fn health_check(
    state: State<'_, Arc<AppState>>,
) -> Result<serde_json::Value, AppError> {
    state.client.health().await
}

#[tauri::command]
pub async fn get_analytics(
    state: State<'_, Arc<AppState>>,
) -> Result<AnalyticsSummary, AppError> {
    state.client.analytics().await
}
