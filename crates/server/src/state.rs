use std::sync::Arc;

use tokio::sync::RwLock;

use modeler_agent::SessionStore;
use modeler_core::config::StreamConfig;
use modeler_dashboard::DatasetCatalog;

pub type SharedSessions = Arc<RwLock<SessionStore>>;

pub struct AppState {
    pub sessions: SharedSessions,
    pub datasets: DatasetCatalog,
    pub stream: StreamConfig,
}

impl AppState {
    pub fn new(stream: StreamConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionStore::new())),
            datasets: DatasetCatalog::builtin(),
            stream,
        }
    }
}
