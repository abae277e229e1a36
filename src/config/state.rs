// Application state module
// Manages runtime state shared across connections

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::{Config, RoutesConfig};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Routing table materialised once at startup
    pub routes: RoutesConfig,
    /// Notified by the signal handler to stop the accept loop
    pub shutdown: Arc<Notify>,

    // Cached config value for lock-free access on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let routes = config.routes();
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Self {
            config,
            routes,
            shutdown: Arc::new(Notify::new()),
            cached_access_log,
        }
    }
}
