//! API Facade for the application.
//!
//! Each function builds the live context from an [`AppConfig`] and runs one
//! command against it. Nothing is cached between calls.

use std::path::Path;

use crate::adapters::anthropic_client::EnvCompletionClientFactory;
use crate::adapters::http::build_client;
use crate::adapters::official_api::OfficialApiClient;
use crate::app::{
    AppContext,
    commands::{analyze as analyze_cmd, ask, detail, search as search_cmd, servers},
};
use crate::services::{Analyzer, DataResolver};

pub use crate::domain::{
    AppConfig, AppError, CharacterDetail, CharacterQuery, CharacterRecord, ConversationTurn,
    Faction, SearchRequest, ServerEntry, ServerListing, TurnRole,
};

type LiveContext = AppContext<OfficialApiClient, EnvCompletionClientFactory>;

/// Create the production context for `config`.
fn create_context(config: &AppConfig) -> Result<LiveContext, AppError> {
    let client = build_client(&config.http)?;
    let resolver = DataResolver::from_config(config, &client)?;
    let directory = OfficialApiClient::new(client, &config.official);
    let analyzer = Analyzer::new(
        EnvCompletionClientFactory::new(config.completion.clone()),
        config.completion.clone(),
        config.prompt,
    );
    Ok(AppContext::new(resolver, directory, analyzer))
}

/// Load configuration from `path`, or from `aion2-guide.toml` in the
/// working directory when present, falling back to built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    crate::domain::load_config(path)
}

// =============================================================================
// Character data
// =============================================================================

/// Resolve a character through the configured provider chain.
pub fn search(config: &AppConfig, request: SearchRequest) -> Result<CharacterRecord, AppError> {
    let ctx = create_context(config)?;
    search_cmd::execute(&ctx, request)
}

/// Fetch a character directly by its upstream identifiers.
pub fn fetch_detail(
    config: &AppConfig,
    character_id: &str,
    server_id: &str,
) -> Result<CharacterDetail, AppError> {
    let ctx = create_context(config)?;
    detail::execute(&ctx, character_id, server_id)
}

/// List game servers. Never fails: problems are reported in
/// [`ServerListing::error`] with an empty server list.
pub fn list_servers(config: &AppConfig) -> ServerListing {
    match create_context(config) {
        Ok(ctx) => servers::execute(&ctx),
        Err(err) => ServerListing::degraded(err.to_string()),
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// Request a combat-power analysis of `record`.
pub fn analyze(config: &AppConfig, record: &CharacterRecord) -> Result<String, AppError> {
    let ctx = create_context(config)?;
    analyze_cmd::execute(&ctx, record)
}

/// Answer a follow-up question about `record`, continuing `history`.
pub fn answer_question(
    config: &AppConfig,
    record: &CharacterRecord,
    question: &str,
    history: &[ConversationTurn],
) -> Result<String, AppError> {
    let ctx = create_context(config)?;
    ask::execute(&ctx, record, question, history)
}
