use log::warn;

use crate::app::AppContext;
use crate::domain::ServerListing;
use crate::ports::{CharacterDirectory, CompletionClientFactory};

/// Server directory; an upstream failure degrades to an empty listing.
pub fn execute<D, F>(ctx: &AppContext<D, F>) -> ServerListing
where
    D: CharacterDirectory,
    F: CompletionClientFactory,
{
    match ctx.directory().list_servers() {
        Ok(servers) => ServerListing::available(servers),
        Err(err) => {
            warn!("Server listing unavailable: {}", err);
            ServerListing::degraded(err.to_string())
        }
    }
}
