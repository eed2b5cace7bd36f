//! Configuration loading.

use std::path::Path;

use crate::domain::{AppConfig, AppError};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "aion2-guide.toml";

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if present.
///
/// An explicitly requested file must exist. The default file is optional;
/// without it the built-in defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let content = std::fs::read_to_string(path)?;
            parse_config_content(&content)
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                let content = std::fs::read_to_string(default_path)?;
                parse_config_content(&content)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_partial_config_with_defaults() {
        let config = parse_config_content(
            r#"
[resolver]
providers = ["scrape", "official"]
provider_timeout_ms = 2500

[third_party]
base_url = "http://127.0.0.1:9000"

[prompt]
equipment_chars = 600
"#,
        )
        .unwrap();

        assert_eq!(config.resolver.providers, vec!["scrape", "official"]);
        assert_eq!(config.resolver.provider_timeout_ms, 2500);
        assert_eq!(config.third_party.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.third_party.min_interval_ms, 500);
        assert_eq!(config.prompt.equipment_chars, 600);
        assert_eq!(config.prompt.stats_chars, 1000);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse_config_content("[resolver]\nretries = 3\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }

    #[test]
    fn validation_runs_after_parse() {
        let err = parse_config_content("[resolver]\nproviders = []\n").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("guide.toml");
        std::fs::write(&path, "[completion]\nmodel = \"test-model\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.completion.model, "test-model");
    }
}
