use crate::app::AppContext;
use crate::domain::{AppError, CharacterRecord};
use crate::ports::{CharacterDirectory, CompletionClientFactory};

pub fn execute<D, F>(ctx: &AppContext<D, F>, record: &CharacterRecord) -> Result<String, AppError>
where
    D: CharacterDirectory,
    F: CompletionClientFactory,
{
    ctx.analyzer().analyze(record)
}
