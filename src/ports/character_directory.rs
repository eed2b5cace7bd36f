//! Direct-by-id lookups against the structured first-party API.

use crate::domain::{AppError, CharacterDetail, ServerEntry};

/// Port for id-based character detail and the server directory.
pub trait CharacterDirectory {
    /// Fetch profile and equipment for a known character id, bypassing search.
    fn fetch_detail(&self, character_id: &str, server_id: &str)
    -> Result<CharacterDetail, AppError>;

    /// List upstream servers.
    fn list_servers(&self) -> Result<Vec<ServerEntry>, AppError>;
}
