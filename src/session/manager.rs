use crate::core::error::StorageError;
use crate::models::session::{
    Credentials, CurrentUser, LoginResponse, Role, DEPARTMENT_KEY, FULL_NAME_KEY, ROLE_KEY,
    SESSION_KEYS, TOKEN_KEY, USER_ID_KEY,
};
use crate::stores::session_storage::{MemoryStorage, SessionStorage};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Why the session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to log out
    Explicit,
    /// The server answered 401
    Unauthorized,
}

/// Session state as seen by subscribers such as the route guard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticated { role: Option<Role> },
    Invalidated,
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated { .. })
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionStatus::Authenticated { role } => *role,
            _ => None,
        }
    }
}

/// Sole owner of session mutation
///
/// Requests never read storage directly: they take a [`Credentials`]
/// snapshot from here. Status changes are published on a watch channel.
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    status: watch::Sender<SessionStatus>,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let initial = status_from_storage(storage.as_ref());
        let (status, _) = watch::channel(initial);

        Self { storage, status }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    /// Fresh read of the token; a rotation by another holder of the same
    /// storage is visible on the next request
    pub fn credentials(&self) -> Option<Credentials> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let role = self.storage.get(ROLE_KEY).and_then(|r| r.parse().ok());

        Some(Credentials { token, role })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_some()
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            role: self.storage.get(ROLE_KEY).and_then(|r| r.parse().ok()),
            user_id: self.storage.get(USER_ID_KEY),
            full_name: self.storage.get(FULL_NAME_KEY),
            department: self.storage.get(DEPARTMENT_KEY),
        }
    }

    /// Persist a successful login: all five keys, token and role together
    pub fn establish(&self, login: &LoginResponse) -> Result<(), StorageError> {
        let values = [
            (TOKEN_KEY, login.token.as_str()),
            (ROLE_KEY, login.role.as_str()),
            (USER_ID_KEY, login.user_id.as_deref().unwrap_or("")),
            (FULL_NAME_KEY, login.full_name.as_deref().unwrap_or("")),
            (DEPARTMENT_KEY, login.department.as_deref().unwrap_or("")),
        ];

        for (key, value) in values {
            if let Err(e) = self.storage.set(key, value) {
                // Never leave a token without its role behind
                if let Err(rollback) = self.remove_all() {
                    warn!(error = %rollback, "Failed to roll back partial session write");
                }
                warn!(key = key, error = %e, "Failed to persist session");
                return Err(e);
            }
        }

        info!(role = %login.role, user_id = ?login.user_id, "Session established");

        self.status.send_replace(SessionStatus::Authenticated {
            role: Some(login.role),
        });

        Ok(())
    }

    /// Remove every session key and notify subscribers
    pub fn clear(&self, reason: LogoutReason) -> Result<(), StorageError> {
        let result = self.remove_all();

        let status = match reason {
            LogoutReason::Explicit => SessionStatus::Anonymous,
            LogoutReason::Unauthorized => SessionStatus::Invalidated,
        };
        self.status.send_replace(status);

        info!(reason = ?reason, "Session cleared");

        result
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    fn remove_all(&self) -> Result<(), StorageError> {
        let mut first_error = None;

        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                warn!(key = key, error = %e, "Failed to remove session key");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn status_from_storage(storage: &dyn SessionStorage) -> SessionStatus {
    match storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
        Some(_) => SessionStatus::Authenticated {
            role: storage.get(ROLE_KEY).and_then(|r| r.parse().ok()),
        },
        None => SessionStatus::Anonymous,
    }
}
