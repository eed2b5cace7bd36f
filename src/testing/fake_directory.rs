use crate::domain::{AppError, CharacterDetail, ServerEntry};
use crate::ports::CharacterDirectory;

/// Directory with canned answers; `None` means the upstream is down.
#[derive(Default)]
pub struct FakeDirectory {
    pub detail: Option<CharacterDetail>,
    pub servers: Option<Vec<ServerEntry>>,
}

impl FakeDirectory {
    pub fn with_servers(servers: Vec<ServerEntry>) -> Self {
        Self { servers: Some(servers), ..Default::default() }
    }

    pub fn with_detail(detail: CharacterDetail) -> Self {
        Self { detail: Some(detail), ..Default::default() }
    }
}

impl CharacterDirectory for FakeDirectory {
    fn fetch_detail(
        &self,
        character_id: &str,
        _server_id: &str,
    ) -> Result<CharacterDetail, AppError> {
        self.detail.clone().ok_or_else(|| {
            AppError::upstream(format!("No character with id '{}'", character_id), Some(404))
        })
    }

    fn list_servers(&self) -> Result<Vec<ServerEntry>, AppError> {
        self.servers
            .clone()
            .ok_or_else(|| AppError::upstream("HTTP 503 from /api/server/list", Some(503)))
    }
}
