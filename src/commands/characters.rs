use std::sync::Arc;

use tauri::State;

use crate::commands::personas::read_portrait;
use crate::error::AppError;
use crate::orchestrator::gate::{Confirm, Preconfirmed};
use crate::studio::types::{Character, CharacterPatch, CreateCharacterInput};
use crate::AppState;

#[tauri::command]
pub async fn list_characters(state: State<'_, Arc<AppState>>) -> Result<Vec<Character>, AppError> {
    state.client.list_characters().await
}

#[tauri::command]
pub async fn create_character(
    state: State<'_, Arc<AppState>>,
    name: String,
    persona_id: Option<String>,
    portrait_path: String,
) -> Result<Character, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".into()));
    }
    let portrait = read_portrait(&portrait_path).await?;
    let input = CreateCharacterInput {
        name: name.trim().to_string(),
        persona_id,
        portrait,
    };
    state.client.create_character(&input).await
}

#[tauri::command]
pub async fn update_character(
    state: State<'_, Arc<AppState>>,
    id: String,
    patch: CharacterPatch,
) -> Result<Character, AppError> {
    state.client.patch_character(&id, &patch).await
}

#[tauri::command]
pub async fn delete_character(
    state: State<'_, Arc<AppState>>,
    id: String,
    confirmed: bool,
) -> Result<bool, AppError> {
    if !Preconfirmed(confirmed).confirm("Delete this character?") {
        return Ok(false);
    }
    state.client.delete_character(&id).await?;
    Ok(true)
}
