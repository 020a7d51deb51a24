// Application state (AppState)

use crate::api::client::ApiClient;
use crate::core::config::Config;
use crate::session::guard::RouteGuard;
use crate::session::manager::SessionManager;
use std::sync::Arc;

/// Shared application state
///
/// The session manager is shared between the client and any route guards
/// so every component sees the same session transitions.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,

    pub client: Arc<ApiClient>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, session: Arc<SessionManager>, client: ApiClient) -> Self {
        Self {
            session,
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }

    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.subscribe())
    }
}
