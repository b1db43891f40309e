use std::sync::Arc;

use tauri::State;

use crate::error::AppError;
use crate::orchestrator::gate::Preconfirmed;
use crate::studio::types::{AgentReport, Draft, FeedResponse};
use crate::AppState;

#[tauri::command]
pub async fn get_feed(state: State<'_, Arc<AppState>>) -> Result<FeedResponse, AppError> {
    state.agent.feed().await
}

#[tauri::command]
pub async fn delete_feed_post(
    state: State<'_, Arc<AppState>>,
    id: String,
    confirmed: bool,
) -> Result<bool, AppError> {
    state.agent.delete_post(&id, &Preconfirmed(confirmed)).await
}

#[tauri::command]
pub async fn critique_post(
    state: State<'_, Arc<AppState>>,
    post_id: String,
) -> Result<AgentReport, AppError> {
    state.agent.critique(&post_id).await
}

#[tauri::command]
pub async fn get_agent_insights(
    state: State<'_, Arc<AppState>>,
    post_id: String,
) -> Result<AgentReport, AppError> {
    state.agent.insights(&post_id).await
}

/// Apply the critique's recommendations as a new draft. The post is re-read
/// from the authoritative feed so the "critique ran" gate is derived from
/// fetched data, not from anything the client cached.
#[tauri::command]
pub async fn apply_recommendations(
    state: State<'_, Arc<AppState>>,
    post_id: String,
) -> Result<Draft, AppError> {
    let feed = state.agent.feed().await?;
    let post = feed
        .items
        .iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("feed post '{post_id}'")))?;
    state.agent.apply(post).await
}
