//! Character data provider port definition.

use crate::domain::{CharacterQuery, ProviderResult};

/// A data source able to answer a character lookup.
///
/// Implementations normalize their raw payload into a
/// [`CharacterRecord`](crate::domain::CharacterRecord) and report every
/// failure as [`ProviderResult::Failure`] instead of returning an error.
pub trait CharacterProvider: Send + Sync {
    /// Stable identifier used in failure reports and configuration.
    fn id(&self) -> &str;

    /// Look up the character described by `query`.
    fn fetch(&self, query: &CharacterQuery) -> ProviderResult;
}
