use crate::domain::AppError;
use crate::ports::{
    CompletionClient, CompletionClientFactory, CompletionRequest, CompletionResponse,
};
use std::sync::{Arc, Mutex};

/// Replies `OK:<n>` where `n` is the character count of the last message.
#[derive(Clone, Default)]
pub struct EchoCompletionClient {
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl EchoCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CompletionClient for EchoCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        let length = request.messages.last().map_or(0, |turn| turn.content.chars().count());
        self.requests.lock().unwrap().push(request);
        Ok(CompletionResponse { text: format!("OK:{}", length) })
    }
}

/// Always fails with the given message, counting attempts.
#[derive(Clone)]
pub struct FailingCompletionClient {
    pub message: String,
    pub attempts: Arc<Mutex<usize>>,
}

impl FailingCompletionClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), attempts: Arc::new(Mutex::new(0)) }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl CompletionClient for FailingCompletionClient {
    fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AppError> {
        *self.attempts.lock().unwrap() += 1;
        Err(AppError::CompletionFailed(self.message.clone()))
    }
}

/// Hands out clones of a prepared client, or reports the service unavailable.
pub struct FakeCompletionClientFactory<C> {
    pub client: Option<C>,
}

impl<C> FakeCompletionClientFactory<C> {
    pub fn new(client: C) -> Self {
        Self { client: Some(client) }
    }

    pub fn unavailable() -> Self {
        Self { client: None }
    }
}

impl<C: CompletionClient + Clone + 'static> CompletionClientFactory
    for FakeCompletionClientFactory<C>
{
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError> {
        match &self.client {
            Some(client) => Ok(Box::new(client.clone())),
            None => Err(AppError::PromptServiceUnavailable("no credential configured".into())),
        }
    }
}
