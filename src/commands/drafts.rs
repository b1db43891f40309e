use std::sync::Arc;

use tauri::State;

use crate::error::AppError;
use crate::orchestrator::batch::{BatchReport, BatchRequest};
use crate::orchestrator::gate::Preconfirmed;
use crate::studio::types::{CreateDraftBody, Draft, DraftPatch, Idea};
use crate::AppState;

/// Gate key serializing batch generation: one batch in flight at a time.
const BATCH_KEY: &str = "generate";

#[tauri::command]
pub async fn list_ideas(state: State<'_, Arc<AppState>>) -> Result<Vec<Idea>, AppError> {
    state.client.list_ideas().await
}

#[tauri::command]
pub async fn list_drafts(state: State<'_, Arc<AppState>>) -> Result<Vec<Draft>, AppError> {
    state.client.list_drafts().await
}

/// Single draft creation: used by the "create draft from idea" flow.
#[tauri::command]
pub async fn create_draft(
    state: State<'_, Arc<AppState>>,
    body: CreateDraftBody,
) -> Result<Draft, AppError> {
    if body.persona_id.trim().is_empty() {
        return Err(AppError::Validation(
            "personaId is required to generate drafts".into(),
        ));
    }
    state.client.create_draft(&body).await
}

/// Fan out a keyword selection into one draft per keyword. Re-invocation
/// while a batch is in flight is refused with a busy error.
#[tauri::command]
pub async fn generate_drafts(
    state: State<'_, Arc<AppState>>,
    request: BatchRequest,
) -> Result<BatchReport, AppError> {
    let _busy = state.batch_gate.try_claim(BATCH_KEY)?;
    state.batch.generate(&request).await
}

#[tauri::command]
pub async fn patch_draft(
    state: State<'_, Arc<AppState>>,
    id: String,
    patch: DraftPatch,
) -> Result<Draft, AppError> {
    state.client.patch_draft(&id, &patch).await
}

#[tauri::command]
pub async fn approve_draft(
    state: State<'_, Arc<AppState>>,
    id: String,
) -> Result<Draft, AppError> {
    state.drafts.approve(&id).await
}

/// `confirmed` is the webview's answer to the delete prompt; an unconfirmed
/// call issues no request and returns false.
#[tauri::command]
pub async fn delete_draft(
    state: State<'_, Arc<AppState>>,
    id: String,
    confirmed: bool,
) -> Result<bool, AppError> {
    state.drafts.delete(&id, &Preconfirmed(confirmed)).await
}

#[tauri::command]
pub async fn regenerate_caption(
    state: State<'_, Arc<AppState>>,
    id: String,
) -> Result<Draft, AppError> {
    state.drafts.regenerate_caption(&id).await
}

#[tauri::command]
pub async fn regenerate_image(
    state: State<'_, Arc<AppState>>,
    id: String,
    style: String,
) -> Result<Draft, AppError> {
    state.drafts.regenerate_image(&id, &style).await
}

/// Export triggers a download navigation, not a fetch. The gate claim keeps
/// the draft marked busy while the shell hands off to the browser/OS.
#[tauri::command]
pub async fn export_draft(state: State<'_, Arc<AppState>>, id: String) -> Result<(), AppError> {
    let (_guard, url) = state.drafts.export_url(&id)?;
    open::that(&url).map_err(|e| AppError::Internal(format!("failed to open export: {e}")))?;
    Ok(())
}
