use crate::api::client::ApiClient;
use crate::core::error::{ApiError, ApiResult};
use crate::models::session::{CurrentUser, LoginRequest, LoginResponse};
use crate::session::manager::LogoutReason;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

impl ApiClient {
    /// Log in and persist the session; returns the raw server payload
    ///
    /// `Ok(None)` means the backend refused the credentials with a 401.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Value> {
        let path = self.login_path.clone();
        self.authenticate(&path, username, password).await
    }

    pub async fn admin_login(&self, username: &str, password: &str) -> ApiResult<Value> {
        let path = self.admin_login_path.clone();
        self.authenticate(&path, username, password).await
    }

    async fn authenticate(&self, path: &str, username: &str, password: &str) -> ApiResult<Value> {
        info!(path = path, username = username, "Logging in");

        let Some(payload) = self.post(path, &LoginRequest { username, password }).await? else {
            warn!(username = username, "Login rejected");
            return Ok(None);
        };

        let has_token = payload
            .get("token")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.is_empty());

        if has_token {
            let login: LoginResponse = serde_json::from_value(payload.clone())
                .map_err(|e| ApiError::UnexpectedResponse(format!("login payload: {}", e)))?;
            self.session().establish(&login)?;
        } else {
            warn!(username = username, "Login response carried no token");
        }

        Ok(Some(payload))
    }

    pub async fn register<T: Serialize + ?Sized>(&self, user: &T) -> ApiResult<Value> {
        self.post("/register", user).await
    }

    /// Clear every session key; subscribers are told to go back to login
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear(LogoutReason::Explicit)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn current_user(&self) -> CurrentUser {
        self.session().current_user()
    }
}
