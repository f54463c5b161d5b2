mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailConfig};
pub use repos::{IReminderRepo, InMemoryReminderRepo, Repos};
pub use services::*;
pub use system::{FakeSys, ISys, RealSys};

use std::sync::Arc;

/// Everything the use cases and the poller need: storage port,
/// configuration and the clock. Constructed once at the composition root
/// and passed by reference, there is no ambient global state.
#[derive(Clone)]
pub struct RemindrContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl RemindrContext {
    pub fn create(config: Config) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> RemindrContext {
    RemindrContext::create(Config::new())
}
