use crate::domain::{CharacterQuery, CharacterRecord, ProviderResult};
use crate::ports::CharacterProvider;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Clone)]
pub enum FakeOutcome {
    Succeed(CharacterRecord),
    Fail(String),
    Panic,
    Stall(Duration),
}

/// Provider with a scripted outcome that logs each call into a shared list.
pub struct FakeProvider {
    pub id: String,
    pub outcome: FakeOutcome,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn new(
        id: impl Into<String>,
        outcome: FakeOutcome,
        calls: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        Self { id: id.into(), outcome, calls }
    }

    pub fn succeeding(id: &str, calls: &Arc<Mutex<Vec<String>>>) -> Self {
        let record = CharacterRecord::named(format!("from-{}", id));
        Self::new(id, FakeOutcome::Succeed(record), Arc::clone(calls))
    }

    pub fn failing(id: &str, calls: &Arc<Mutex<Vec<String>>>) -> Self {
        Self::new(id, FakeOutcome::Fail(format!("{} is down", id)), Arc::clone(calls))
    }
}

impl CharacterProvider for FakeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self, _query: &CharacterQuery) -> ProviderResult {
        self.calls.lock().unwrap().push(self.id.clone());
        match &self.outcome {
            FakeOutcome::Succeed(record) => ProviderResult::Success(record.clone()),
            FakeOutcome::Fail(reason) => ProviderResult::failure(&self.id, reason.clone()),
            FakeOutcome::Panic => panic!("{} exploded", self.id),
            FakeOutcome::Stall(duration) => {
                thread::sleep(*duration);
                ProviderResult::Success(CharacterRecord::named("too-late"))
            }
        }
    }
}
