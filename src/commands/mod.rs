//! Tauri IPC commands: the view-facing surface.
//!
//! Commands stay thin: validate, delegate to the orchestrator or the client,
//! return the server-confirmed entity. The webview re-fetches authoritative
//! lists after every settled mutation.

pub mod characters;
pub mod drafts;
pub mod feed;
pub mod personas;
pub mod system;
pub mod trends;
