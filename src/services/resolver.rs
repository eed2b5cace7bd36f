//! Ordered provider fallback.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;

use crate::adapters::html_scrape::HtmlScrapeProvider;
use crate::adapters::official_api::{OfficialApiClient, OfficialApiProvider};
use crate::adapters::third_party_api::ThirdPartyApiProvider;
use crate::domain::configuration::{PROVIDER_OFFICIAL, PROVIDER_SCRAPE, PROVIDER_THIRD_PARTY};
use crate::domain::{
    AppConfig, AppError, CharacterQuery, CharacterRecord, ProviderFailure, ProviderResult,
};
use crate::ports::CharacterProvider;

/// Tries each provider in order until one produces a record.
pub struct DataResolver {
    providers: Vec<Arc<dyn CharacterProvider>>,
    provider_timeout: Duration,
}

impl std::fmt::Debug for DataResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataResolver")
            .field("providers", &self.provider_ids())
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}

impl DataResolver {
    pub fn new(providers: Vec<Arc<dyn CharacterProvider>>, provider_timeout: Duration) -> Self {
        Self { providers, provider_timeout }
    }

    /// Build the configured providers around one shared HTTP client.
    pub fn from_config(config: &AppConfig, client: &Client) -> Result<Self, AppError> {
        let mut providers: Vec<Arc<dyn CharacterProvider>> = Vec::new();
        for id in &config.resolver.providers {
            let provider: Arc<dyn CharacterProvider> = match id.as_str() {
                PROVIDER_OFFICIAL => Arc::new(OfficialApiProvider::new(OfficialApiClient::new(
                    client.clone(),
                    &config.official,
                ))),
                PROVIDER_THIRD_PARTY => {
                    Arc::new(ThirdPartyApiProvider::new(client.clone(), &config.third_party))
                }
                PROVIDER_SCRAPE => {
                    Arc::new(HtmlScrapeProvider::new(client.clone(), &config.scrape))
                }
                other => {
                    return Err(AppError::config_error(format!("Unknown provider '{}'", other)));
                }
            };
            providers.push(provider);
        }

        Ok(Self::new(providers, Duration::from_millis(config.resolver.provider_timeout_ms)))
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Resolve `query` to a record, or report every provider's failure in order.
    pub fn resolve(&self, query: &CharacterQuery) -> Result<CharacterRecord, AppError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            info!("Trying provider '{}' for '{}'", provider.id(), query.name());
            match self.run_provider(provider, query) {
                ProviderResult::Success(record) => match record.validate() {
                    Ok(()) => {
                        info!("Provider '{}' resolved '{}'", provider.id(), query.name());
                        return Ok(record);
                    }
                    Err(err) => {
                        warn!("Provider '{}' returned an unusable record: {}", provider.id(), err);
                        failures.push(ProviderFailure::new(provider.id(), err.to_string()));
                    }
                },
                ProviderResult::Failure(failure) => {
                    warn!("Provider failed: {}", failure);
                    failures.push(failure);
                }
            }
        }

        Err(AppError::AllProvidersExhausted(failures))
    }

    /// Run one provider on its own thread, bounded by the provider timeout.
    ///
    /// A call that overruns is abandoned; its thread finishes on its own once
    /// the HTTP client's timeout fires.
    fn run_provider(
        &self,
        provider: &Arc<dyn CharacterProvider>,
        query: &CharacterQuery,
    ) -> ProviderResult {
        let id = provider.id().to_string();
        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(provider);
        let worker_query = query.clone();

        let spawned = thread::Builder::new().name(format!("provider-{}", id)).spawn(move || {
            let _ = tx.send(worker.fetch(&worker_query));
        });
        if let Err(err) = spawned {
            return ProviderResult::failure(id, format!("could not start worker: {}", err));
        }

        match rx.recv_timeout(self.provider_timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => ProviderResult::failure(
                id,
                format!("timed out after {} ms", self.provider_timeout.as_millis()),
            ),
            Err(RecvTimeoutError::Disconnected) => {
                ProviderResult::failure(id, "provider panicked")
            }
        }
    }
}
