use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::api::client::ApiClient;
use crate::core::config::{Config, SessionConfig};
use crate::core::state::AppState;
use crate::session::manager::SessionManager;
use crate::stores::file_storage::FileStorage;
use crate::stores::session_storage::{MemoryStorage, SessionStorage};

/// File-backed storage unless the config asks for `memory`
pub fn open_storage(config: &SessionConfig) -> Result<Arc<dyn SessionStorage>> {
    if config.storage == "memory" {
        info!("Using in-memory session storage");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let path = &config.path;
    let storage = FileStorage::open(path.clone())
        .with_context(|| format!("Failed to open session file '{}'", path.display()))?;
    info!(path = %path.display(), "Using file session storage");
    Ok(Arc::new(storage))
}

// this runs at boot time
pub fn build_state(config: Config) -> Result<AppState> {
    let storage = open_storage(&config.session)?;
    let session = Arc::new(SessionManager::new(storage));

    let client = ApiClient::new(&config.api, Arc::clone(&session))
        .context("Failed to create API client")?;

    info!(
        base_url = %client.base_url(),
        authenticated = session.is_authenticated(),
        "Client state restored"
    );

    Ok(AppState::new(config, session, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{LoginResponse, Role};
    use crate::session::guard::RouteDecision;
    use tempfile::TempDir;

    fn login() -> LoginResponse {
        LoginResponse {
            token: "abc".to_string(),
            role: Role::Student,
            user_id: Some("42".to_string()),
            full_name: Some("Asha".to_string()),
            department: Some("CSE".to_string()),
        }
    }

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.session.path = dir.path().join("session.json");
        config
    }

    #[test]
    fn test_default_state_is_anonymous() {
        let dir = TempDir::new().unwrap();
        let state = build_state(config_in(&dir)).unwrap();
        assert!(!state.session.is_authenticated());
        assert_eq!(
            state.route_guard().decide("/student"),
            RouteDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_default_config_persists_sessions_to_disk() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.session.storage, "file");
    }

    #[test]
    fn test_file_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let first = build_state(config.clone()).unwrap();
        first.session.establish(&login()).unwrap();
        drop(first);

        let second = build_state(config).unwrap();
        assert!(second.client.is_authenticated());
        assert_eq!(second.client.current_user().full_name.as_deref(), Some("Asha"));
        assert_eq!(second.route_guard().decide("/student"), RouteDecision::Render);

        second.client.logout().unwrap();
        let third = build_state(config_in(&dir)).unwrap();
        assert!(!third.client.is_authenticated());
    }

    #[test]
    fn test_memory_session_is_forgotten() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.session.storage = "memory".to_string();

        let first = build_state(config.clone()).unwrap();
        assert_eq!(first.config.session.storage, "memory");
        first.session.establish(&login()).unwrap();
        drop(first);

        assert!(!build_state(config).unwrap().client.is_authenticated());
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn test_corrupt_session_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut config = Config::default();
        config.session.path = path;

        let err = build_state(config).err().unwrap();
        assert!(err.to_string().contains("Failed to open session file"));
    }
}
