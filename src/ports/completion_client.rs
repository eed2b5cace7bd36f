//! Text-completion provider port definition.

use crate::domain::{AppError, ConversationTurn};

/// Request sent to the completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Ordered conversation; the last turn is the new user message.
    pub messages: Vec<ConversationTurn>,
    /// Maximum number of output tokens.
    pub max_tokens: u32,
    /// Sampling temperature, provider default when absent.
    pub temperature: Option<f32>,
}

/// Response from the completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// First text output of the provider.
    pub text: String,
}

/// Port for text-completion operations.
pub trait CompletionClient {
    /// Submit one request. Implementations make exactly one attempt.
    fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AppError>;
}

/// Factory for creating a completion client on demand.
///
/// Creation happens at call time so an unconfigured provider surfaces as
/// [`AppError::PromptServiceUnavailable`] on the call that needs it.
pub trait CompletionClientFactory {
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError>;
}
