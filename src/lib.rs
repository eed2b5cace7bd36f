//! aion2-guide: resolve Aion 2 character data across fallback providers and
//! request combat-power analysis from a text-completion service.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AppConfig, AppError, CharacterDetail, CharacterQuery, CharacterRecord, ConversationTurn,
    Faction, SearchRequest, ServerEntry, ServerListing, TurnRole, analyze, answer_question,
    fetch_detail, list_servers, load_config, search,
};
