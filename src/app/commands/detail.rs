use crate::app::AppContext;
use crate::domain::{AppError, CharacterDetail};
use crate::ports::{CharacterDirectory, CompletionClientFactory};

/// Direct lookup by identifiers; upstream errors surface unchanged.
pub fn execute<D, F>(
    ctx: &AppContext<D, F>,
    character_id: &str,
    server_id: &str,
) -> Result<CharacterDetail, AppError>
where
    D: CharacterDirectory,
    F: CompletionClientFactory,
{
    let character_id = character_id.trim();
    let server_id = server_id.trim();
    if character_id.is_empty() || server_id.is_empty() {
        return Err(AppError::validation("Character id and server id are required"));
    }
    ctx.directory().fetch_detail(character_id, server_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::test_context::context;
    use crate::domain::CharacterInfo;
    use crate::testing::FakeDirectory;

    #[test]
    fn missing_ids_are_rejected() {
        let ctx = context(vec![], FakeDirectory::default(), None);
        let err = execute(&ctx, " ", "1001").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn upstream_error_is_surfaced() {
        let ctx = context(vec![], FakeDirectory::default(), None);
        let err = execute(&ctx, "c-77", "1001").unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: Some(404), .. }));
    }

    #[test]
    fn returns_directory_detail() {
        let detail = CharacterDetail {
            info: CharacterInfo { name: "Hero".into(), ..Default::default() },
            equipment: vec![],
        };
        let ctx = context(vec![], FakeDirectory::with_detail(detail.clone()), None);
        assert_eq!(execute(&ctx, "c-77", "1001").unwrap(), detail);
    }
}
