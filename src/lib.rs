pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod studio;

#[cfg(feature = "desktop")]
mod commands;

use std::sync::Arc;

use config::StudioConfig;
use orchestrator::agent::FeedAgent;
use orchestrator::batch::BatchGenerator;
use orchestrator::gate::{ActionGate, GatePolicy};
use orchestrator::trends::TrendResolver;
use studio::client::StudioClient;

/// Shared application state accessible from all Tauri commands.
///
/// The client holds no durable data: `client` is the only path to the
/// remote store, and the gates only track which entity ids are mid-action.
pub struct AppState {
    pub config: StudioConfig,
    pub client: Arc<StudioClient>,
    pub resolver: TrendResolver,
    pub batch: BatchGenerator,
    pub drafts: orchestrator::gate::DraftActions,
    pub agent: FeedAgent,
    /// Serializes whole-batch generation (the dashboard's busy flag).
    pub batch_gate: Arc<ActionGate>,
}

impl AppState {
    pub fn new(config: StudioConfig) -> Self {
        let client = Arc::new(StudioClient::new(&config));

        // Per-entity locking is the default; GatePolicy::Exclusive gives the
        // stricter one-mutation-anywhere mode (see DESIGN.md).
        let draft_gate = ActionGate::new(GatePolicy::PerEntity);
        let post_gate = ActionGate::new(GatePolicy::PerEntity);

        Self {
            resolver: TrendResolver::new(client.clone()),
            batch: BatchGenerator::new(client.clone()),
            drafts: orchestrator::gate::DraftActions::new(client.clone(), draft_gate),
            agent: FeedAgent::new(client.clone(), post_gate),
            batch_gate: ActionGate::per_entity(),
            client,
            config,
        }
    }
}

#[cfg(feature = "desktop")]
pub fn run() {
    logging::init();

    tracing::info!("Starting Trend Studio v{}", env!("CARGO_PKG_VERSION"));

    let config = match StudioConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(base_url = %config.base_url, "Studio service configured");

    let state = Arc::new(AppState::new(config));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            // Trends
            commands::trends::resolve_trends,
            // Drafts
            commands::drafts::list_ideas,
            commands::drafts::list_drafts,
            commands::drafts::create_draft,
            commands::drafts::generate_drafts,
            commands::drafts::patch_draft,
            commands::drafts::approve_draft,
            commands::drafts::delete_draft,
            commands::drafts::regenerate_caption,
            commands::drafts::regenerate_image,
            commands::drafts::export_draft,
            // Personas
            commands::personas::list_personas,
            commands::personas::create_persona,
            commands::personas::update_persona,
            commands::personas::delete_persona,
            // Characters
            commands::characters::list_characters,
            commands::characters::create_character,
            commands::characters::update_character,
            commands::characters::delete_character,
            // Feed & agent
            commands::feed::get_feed,
            commands::feed::delete_feed_post,
            commands::feed::critique_post,
            commands::feed::get_agent_insights,
            commands::feed::apply_recommendations,
            // System
            commands::system::health_check,
            commands::system::get_analytics,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
