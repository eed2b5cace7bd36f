//! Application configuration domain models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Identifiers of the built-in character providers.
pub const PROVIDER_OFFICIAL: &str = "official";
pub const PROVIDER_THIRD_PARTY: &str = "third_party";
pub const PROVIDER_SCRAPE: &str = "scrape";

const KNOWN_PROVIDERS: [&str; 3] = [PROVIDER_OFFICIAL, PROVIDER_THIRD_PARTY, PROVIDER_SCRAPE];

/// Configuration loaded from `aion2-guide.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub official: OfficialApiConfig,
    #[serde(default)]
    pub third_party: ThirdPartyApiConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.resolver.validate()?;
        self.http.validate()?;
        self.official.validate()?;
        self.completion.validate()?;
        self.prompt.validate()?;
        Ok(())
    }
}

/// Provider order and per-provider timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Provider ids, tried strictly in this order.
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
    /// Time allowed for each provider before it counts as failed.
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { providers: default_providers(), provider_timeout_ms: default_provider_timeout_ms() }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.providers.is_empty() {
            return Err(AppError::config_error("resolver.providers must not be empty"));
        }
        let mut seen = HashSet::new();
        for id in &self.providers {
            if !KNOWN_PROVIDERS.contains(&id.as_str()) {
                return Err(AppError::config_error(format!(
                    "Unknown provider '{}': must be one of {}",
                    id,
                    KNOWN_PROVIDERS.join(", ")
                )));
            }
            if !seen.insert(id.as_str()) {
                return Err(AppError::config_error(format!("Provider '{}' listed twice", id)));
            }
        }
        if self.provider_timeout_ms == 0 {
            return Err(AppError::config_error("provider_timeout_ms must be greater than 0"));
        }
        Ok(())
    }
}

fn default_providers() -> Vec<String> {
    KNOWN_PROVIDERS.iter().map(|id| id.to_string()).collect()
}

fn default_provider_timeout_ms() -> u64 {
    10_000
}

/// Headers and timeout shared by every data-source request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            referer: default_referer(),
            origin: default_origin(),
            accept_language: default_accept_language(),
            timeout_secs: default_http_timeout(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("http.timeout_secs must be greater than 0"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::config_error("http.user_agent must not be empty"));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("Aion2Guide/{}", env!("CARGO_PKG_VERSION"))
}

fn default_referer() -> String {
    "https://aion2.plaync.com/".to_string()
}

fn default_origin() -> String {
    "https://aion2.plaync.com".to_string()
}

fn default_accept_language() -> String {
    "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

/// First-party structured API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfficialApiConfig {
    #[serde(default = "default_official_url")]
    pub base_url: Url,
    /// Search results requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub min_interval_ms: u64,
}

impl Default for OfficialApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_official_url(),
            page_size: default_page_size(),
            min_interval_ms: 0,
        }
    }
}

impl OfficialApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page_size == 0 {
            return Err(AppError::config_error("official.page_size must be greater than 0"));
        }
        Ok(())
    }
}

fn default_official_url() -> Url {
    Url::parse("https://aion2.plaync.com").expect("Default official URL must be valid")
}

fn default_page_size() -> u32 {
    10
}

/// Unofficial third-party JSON API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThirdPartyApiConfig {
    #[serde(default = "default_third_party_url")]
    pub base_url: Url,
    #[serde(default = "default_third_party_interval")]
    pub min_interval_ms: u64,
}

impl Default for ThirdPartyApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_third_party_url(),
            min_interval_ms: default_third_party_interval(),
        }
    }
}

fn default_third_party_url() -> Url {
    Url::parse("https://api.example.com").expect("Default third-party URL must be valid")
}

fn default_third_party_interval() -> u64 {
    500
}

/// Character page scraping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeConfig {
    #[serde(default = "default_official_url")]
    pub base_url: Url,
    #[serde(default = "default_search_path")]
    pub search_path: String,
    #[serde(default = "default_scrape_interval")]
    pub min_interval_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: default_official_url(),
            search_path: default_search_path(),
            min_interval_ms: default_scrape_interval(),
        }
    }
}

fn default_search_path() -> String {
    "/ko-kr/characters/index".to_string()
}

fn default_scrape_interval() -> u64 {
    1000
}

/// Text-completion provider (Anthropic Messages API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_url")]
    pub api_url: Url,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,
    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,
    #[serde(default = "default_question_max_tokens")]
    pub question_max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_completion_url(),
            model: default_model(),
            anthropic_version: default_anthropic_version(),
            analysis_max_tokens: default_analysis_max_tokens(),
            question_max_tokens: default_question_max_tokens(),
            temperature: None,
            timeout_secs: default_completion_timeout(),
        }
    }
}

impl CompletionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::config_error("completion.model must not be empty"));
        }
        if self.analysis_max_tokens == 0 || self.question_max_tokens == 0 {
            return Err(AppError::config_error("completion token budgets must be greater than 0"));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(AppError::config_error("completion.temperature must be within 0..=1"));
            }
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("completion.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

fn default_completion_url() -> Url {
    Url::parse("https://api.anthropic.com/v1/messages")
        .expect("Default completion URL must be valid")
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

fn default_analysis_max_tokens() -> u32 {
    4000
}

fn default_question_max_tokens() -> u32 {
    2000
}

fn default_completion_timeout() -> u64 {
    120
}

/// Size caps applied to serialized record sections before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptConfig {
    #[serde(default = "default_section_chars")]
    pub equipment_chars: usize,
    #[serde(default = "default_section_chars")]
    pub stats_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { equipment_chars: default_section_chars(), stats_chars: default_section_chars() }
    }
}

impl PromptConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.equipment_chars == 0 || self.stats_chars == 0 {
            return Err(AppError::config_error("prompt section caps must be greater than 0"));
        }
        Ok(())
    }
}

fn default_section_chars() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resolver.providers, vec!["official", "third_party", "scrape"]);
        assert_eq!(config.resolver.provider_timeout_ms, 10_000);
        assert_eq!(config.scrape.min_interval_ms, 1000);
        assert_eq!(config.third_party.min_interval_ms, 500);
        assert_eq!(config.completion.analysis_max_tokens, 4000);
        assert_eq!(config.completion.question_max_tokens, 2000);
    }

    #[test]
    fn rejects_unknown_provider() {
        let config = ResolverConfig { providers: vec!["mirror".into()], ..Default::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("mirror")));
    }

    #[test]
    fn rejects_duplicate_provider() {
        let config = ResolverConfig {
            providers: vec!["scrape".into(), "scrape".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_provider_list() {
        let config = ResolverConfig { providers: vec![], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ResolverConfig { provider_timeout_ms: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let config = CompletionConfig { temperature: Some(1.5), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_prompt_cap() {
        let config = PromptConfig { equipment_chars: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
