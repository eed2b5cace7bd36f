use std::io;

use thiserror::Error;

use crate::domain::provider::ProviderFailure;

/// Library-wide error type for aion2-guide operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required input missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// A single upstream data source failed.
    #[error("{message}")]
    Upstream { message: String, status: Option<u16> },

    /// Every configured provider failed to resolve the character.
    #[error("All providers exhausted: {}", format_failures(.0))]
    AllProvidersExhausted(Vec<ProviderFailure>),

    /// Completion provider is not configured (e.g. missing credential).
    #[error("Prompt service unavailable: {0}")]
    PromptServiceUnavailable(String),

    /// Completion request failed at the network or provider level.
    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    /// Prompt template could not be rendered.
    #[error("Prompt assembly failed: {0}")]
    PromptAssembly(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return "no providers configured".to_string();
    }
    failures.iter().map(ProviderFailure::to_string).collect::<Vec<_>>().join("; ")
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    pub fn upstream<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::Upstream { message: message.into(), status }
    }

    /// Per-provider failure reasons when resolution was exhausted.
    pub fn provider_failures(&self) -> Option<&[ProviderFailure]> {
        match self {
            AppError::AllProvidersExhausted(failures) => Some(failures),
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::AllProvidersExhausted(_) => io::ErrorKind::NotFound,
            AppError::PromptServiceUnavailable(_) => io::ErrorKind::Unsupported,
            AppError::Upstream { .. }
            | AppError::CompletionFailed(_)
            | AppError::PromptAssembly(_) => io::ErrorKind::Other,
        }
    }
}
