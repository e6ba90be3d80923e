use std::sync::Arc;

use crate::api::JobSphereApi;
use crate::config::Config;

/// Shared client state handed to every page controller on construction.
#[derive(Clone)]
pub struct ClientState {
    /// Swappable API backend: `HttpApi` in the binary, an in-memory fake in tests.
    pub api: Arc<dyn JobSphereApi>,
    pub config: Config,
}

impl ClientState {
    pub fn new(api: Arc<dyn JobSphereApi>, config: Config) -> Self {
        Self { api, config }
    }
}

#[cfg(test)]
pub(crate) fn test_state(api: &Arc<crate::api::fake::FakeApi>) -> ClientState {
    ClientState::new(api.clone(), Config::default())
}
