pub mod character;
pub mod configuration;
pub mod conversation;
pub mod detail;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod provider;

pub use character::{
    CharacterQuery, CharacterRecord, EquipmentItem, Faction, SearchRequest, SkillSet,
};
pub use configuration::{
    AppConfig, CompletionConfig, HttpConfig, OfficialApiConfig, PromptConfig, ResolverConfig,
    ScrapeConfig, ThirdPartyApiConfig, load_config, parse_config_content,
};
pub use conversation::{ConversationTurn, TurnRole, load_history};
pub use detail::{CharacterDetail, CharacterInfo, EquipmentEntry, ServerEntry, ServerListing};
pub use error::AppError;
pub use prompt::{build_prompt, build_question};
pub use provider::{ProviderFailure, ProviderResult};
