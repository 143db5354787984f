//! Application state for the web layer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::CachedPlanner;
use crate::network::Network;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route planner with result cache
    pub planner: Arc<CachedPlanner>,

    /// Where found routes are written as station names, if anywhere
    pub route_output: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: CachedPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
            route_output: None,
        }
    }

    /// Write every route found to `path`.
    pub fn with_route_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.route_output = Some(Arc::new(path.into()));
        self
    }

    /// The network every request is answered against.
    pub fn network(&self) -> &Network {
        self.planner.planner().network()
    }
}
