use crate::app::AppContext;
use crate::domain::{AppError, CharacterRecord, SearchRequest};
use crate::ports::{CharacterDirectory, CompletionClientFactory};

/// Normalize the request and resolve it through the provider chain.
pub fn execute<D, F>(
    ctx: &AppContext<D, F>,
    request: SearchRequest,
) -> Result<CharacterRecord, AppError>
where
    D: CharacterDirectory,
    F: CompletionClientFactory,
{
    let query = request.into_query()?;
    ctx.resolver().resolve(&query)
}
