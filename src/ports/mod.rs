mod character_directory;
mod character_provider;
mod completion_client;

pub use character_directory::CharacterDirectory;
pub use character_provider::CharacterProvider;
pub use completion_client::{
    CompletionClient, CompletionClientFactory, CompletionRequest, CompletionResponse,
};
