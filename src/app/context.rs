use crate::ports::{CharacterDirectory, CompletionClientFactory};
use crate::services::{Analyzer, DataResolver};

/// Application context holding dependencies for command execution.
pub struct AppContext<D: CharacterDirectory, F: CompletionClientFactory> {
    resolver: DataResolver,
    directory: D,
    analyzer: Analyzer<F>,
}

impl<D: CharacterDirectory, F: CompletionClientFactory> AppContext<D, F> {
    /// Create a new application context.
    pub fn new(resolver: DataResolver, directory: D, analyzer: Analyzer<F>) -> Self {
        Self { resolver, directory, analyzer }
    }

    /// Ordered provider fallback used by search.
    pub fn resolver(&self) -> &DataResolver {
        &self.resolver
    }

    /// Direct-by-id lookups and the server directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn analyzer(&self) -> &Analyzer<F> {
        &self.analyzer
    }
}
