pub mod app_config;
pub mod loader;

pub use app_config::{
    AppConfig, CompletionConfig, HttpConfig, OfficialApiConfig, PROVIDER_OFFICIAL,
    PROVIDER_SCRAPE, PROVIDER_THIRD_PARTY, PromptConfig, ResolverConfig, ScrapeConfig,
    ThirdPartyApiConfig,
};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
