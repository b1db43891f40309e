use std::path::Path;
use std::sync::Arc;

use tauri::State;

use crate::error::AppError;
use crate::orchestrator::gate::{Confirm, Preconfirmed};
use crate::studio::types::{CreatePersonaInput, Persona, PersonaPatch, PortraitUpload};
use crate::AppState;

/// Read a user-chosen portrait file into an upload part.
pub(crate) async fn read_portrait(path: &str) -> Result<PortraitUpload, AppError> {
    let bytes = tokio::fs::read(path).await?;
    let filename = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "portrait.jpg".to_string());
    Ok(PortraitUpload { filename, bytes })
}

#[tauri::command]
pub async fn list_personas(state: State<'_, Arc<AppState>>) -> Result<Vec<Persona>, AppError> {
    state.client.list_personas().await
}

/// Create a persona from form fields plus a mandatory portrait file path
/// (picked in the webview via the dialog plugin).
#[tauri::command]
pub async fn create_persona(
    state: State<'_, Arc<AppState>>,
    name: String,
    identity_hint: Option<String>,
    style: Option<String>,
    mood: Option<String>,
    bg: Option<String>,
    portrait_path: String,
) -> Result<Persona, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".into()));
    }
    let portrait = read_portrait(&portrait_path).await?;
    let input = CreatePersonaInput {
        name: name.trim().to_string(),
        identity_hint,
        style: style.unwrap_or_else(|| "photo_realistic".to_string()),
        mood: mood.unwrap_or_else(|| "neutral".to_string()),
        bg: bg.unwrap_or_else(|| "studio_gray".to_string()),
        portrait,
    };
    state.client.create_persona(&input).await
}

#[tauri::command]
pub async fn update_persona(
    state: State<'_, Arc<AppState>>,
    id: String,
    patch: PersonaPatch,
) -> Result<Persona, AppError> {
    state.client.patch_persona(&id, &patch).await
}

#[tauri::command]
pub async fn delete_persona(
    state: State<'_, Arc<AppState>>,
    id: String,
    confirmed: bool,
) -> Result<bool, AppError> {
    // Cascading effects on drafts referencing the persona are a server concern.
    if !Preconfirmed(confirmed).confirm("Delete this persona?") {
        return Ok(false);
    }
    state.client.delete_persona(&id).await?;
    Ok(true)
}
