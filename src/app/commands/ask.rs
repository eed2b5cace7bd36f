use crate::app::AppContext;
use crate::domain::{AppError, CharacterRecord, ConversationTurn};
use crate::ports::{CharacterDirectory, CompletionClientFactory};

pub fn execute<D, F>(
    ctx: &AppContext<D, F>,
    record: &CharacterRecord,
    question: &str,
    history: &[ConversationTurn],
) -> Result<String, AppError>
where
    D: CharacterDirectory,
    F: CompletionClientFactory,
{
    ctx.analyzer().answer_question(record, question, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::test_context::context;
    use crate::testing::{EchoCompletionClient, FakeDirectory};

    #[test]
    fn forwards_history_and_question() {
        let client = EchoCompletionClient::new();
        let ctx = context(vec![], FakeDirectory::default(), Some(client.clone()));
        let history = vec![ConversationTurn::assistant("Your weapon is weak.")];

        let answer =
            execute(&ctx, &CharacterRecord::named("Hero"), "Which weapon?", &history).unwrap();

        assert!(answer.starts_with("OK:"));
        assert_eq!(client.get_requests()[0].messages.len(), 2);
    }

    #[test]
    fn empty_question_is_a_validation_error() {
        let ctx = context(vec![], FakeDirectory::default(), Some(EchoCompletionClient::new()));
        let err = execute(&ctx, &CharacterRecord::named("Hero"), "", &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
