//! Prompt assembly plus a single completion call.

use log::debug;

use crate::domain::{
    AppError, CharacterRecord, CompletionConfig, ConversationTurn, PromptConfig, build_prompt,
    build_question,
};
use crate::ports::{CompletionClientFactory, CompletionRequest};

/// Turns character records into completion requests.
pub struct Analyzer<F: CompletionClientFactory> {
    factory: F,
    completion: CompletionConfig,
    limits: PromptConfig,
}

impl<F: CompletionClientFactory> Analyzer<F> {
    pub fn new(factory: F, completion: CompletionConfig, limits: PromptConfig) -> Self {
        Self { factory, completion, limits }
    }

    /// Produce a free-text analysis of `record`.
    pub fn analyze(&self, record: &CharacterRecord) -> Result<String, AppError> {
        record.validate()?;
        let prompt = build_prompt(record, &self.limits)?;
        debug!("Analysis prompt for '{}' is {} chars", record.name, prompt.chars().count());

        self.complete(vec![ConversationTurn::user(prompt)], self.completion.analysis_max_tokens)
    }

    /// Answer a follow-up question about `record`, continuing `history`.
    pub fn answer_question(
        &self,
        record: &CharacterRecord,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, AppError> {
        if question.trim().is_empty() {
            return Err(AppError::validation("Question must not be empty"));
        }
        record.validate()?;

        let mut messages = history.to_vec();
        messages.push(ConversationTurn::user(build_question(record, question)?));
        debug!("Question for '{}' with {} prior turn(s)", record.name, history.len());

        self.complete(messages, self.completion.question_max_tokens)
    }

    fn complete(
        &self,
        messages: Vec<ConversationTurn>,
        max_tokens: u32,
    ) -> Result<String, AppError> {
        let client = self.factory.create()?;
        let response = client.complete(CompletionRequest {
            messages,
            max_tokens,
            temperature: self.completion.temperature,
        })?;
        Ok(response.text)
    }
}
