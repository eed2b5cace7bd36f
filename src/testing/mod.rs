mod env_guard;
mod fake_completion_client;
mod fake_directory;
mod fake_provider;

pub use env_guard::EnvVarGuard;
pub use fake_completion_client::{
    EchoCompletionClient, FailingCompletionClient, FakeCompletionClientFactory,
};
pub use fake_directory::FakeDirectory;
pub use fake_provider::{FakeOutcome, FakeProvider};
