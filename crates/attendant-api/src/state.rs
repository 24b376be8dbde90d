use std::sync::Arc;

use attendant_core::Orchestrator;
use attendant_persist::PersistClient;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<Orchestrator>,
    pub persist: Arc<PersistClient>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Orchestrator, persist: Arc<PersistClient>) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            persist,
        }
    }
}
