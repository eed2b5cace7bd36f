//! Outcome of a single provider lookup.

use std::fmt;

use serde::Serialize;

use crate::domain::{AppError, CharacterRecord};

/// Why a provider could not answer a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFailure {
    pub provider_id: String,
    pub reason: String,
}

impl ProviderFailure {
    pub fn new(provider_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { provider_id: provider_id.into(), reason: reason.into() }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider_id, self.reason)
    }
}

/// Result of asking one provider for a character.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResult {
    Success(CharacterRecord),
    Failure(ProviderFailure),
}

impl ProviderResult {
    pub fn failure(provider_id: impl Into<String>, reason: impl Into<String>) -> Self {
        ProviderResult::Failure(ProviderFailure::new(provider_id, reason))
    }

    /// Fold a fallible provider call into a result tagged with the provider id.
    pub fn from_result(provider_id: &str, result: Result<CharacterRecord, AppError>) -> Self {
        match result {
            Ok(record) => ProviderResult::Success(record),
            Err(err) => ProviderResult::failure(provider_id, err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderResult::Success(_))
    }
}
