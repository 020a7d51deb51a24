use crate::api::envelope::decode_list;
use crate::core::config::ApiConfig;
use crate::core::error::{ApiError, ApiResult};
use crate::session::manager::{LogoutReason, SessionManager};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const LEGACY_TOKEN_HEADER: &str = "x-access-token";

/// Request payload
pub enum RequestBody {
    Empty,
    Json(Vec<u8>),
    Multipart(reqwest::multipart::Form),
}

pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
        }
    }

    /// Bodyless call with an arbitrary method (POST triggers, DELETE)
    pub fn empty(method: Method) -> Self {
        Self {
            method,
            body: RequestBody::Empty,
        }
    }

    pub fn json<T: Serialize + ?Sized>(method: Method, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::Request(format!("Failed to serialize body: {}", e)))?;

        Ok(Self {
            method,
            body: RequestBody::Json(bytes),
        })
    }

    pub fn multipart(form: reqwest::multipart::Form) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Multipart(form),
        }
    }

    /// JSON content type unless the body is multipart or this is a GET
    fn wants_json_content_type(&self) -> bool {
        !matches!(self.body, RequestBody::Multipart(_)) && self.method != Method::GET
    }
}

/// API client for the timetable backend
///
/// Every call goes through [`ApiClient::request`], which attaches the
/// current credentials and normalizes the response. `Ok(None)` means the
/// server answered 401 and the session has been cleared.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    pub(crate) login_path: String,
    pub(crate) admin_login_path: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            admin_login_path: config.admin_login_path.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Issue a call to `base_url + path` and normalize the outcome
    pub async fn request(&self, path: &str, options: RequestOptions) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let credentials = self.session.credentials();
        let json_content_type = options.wants_json_content_type();
        let method = options.method;

        let mut builder = self.client.request(method.clone(), &url);

        if json_content_type {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        if let Some(credentials) = &credentials {
            builder = builder
                .header(LEGACY_TOKEN_HEADER, credentials.token.as_str())
                .header(AUTHORIZATION, credentials.bearer());
        }

        debug!(
            method = %method,
            path = path,
            authenticated = credentials.is_some(),
            "Sending request"
        );

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                ApiError::Request(e.to_string())
            } else {
                warn!(method = %method, path = path, error = %e, "Backend unreachable");
                ApiError::Network(e)
            }
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(method = %method, path = path, "Session rejected by backend, logging out");
            if let Err(e) = self.session.clear(LogoutReason::Unauthorized) {
                warn!(error = %e, "Failed to clear session storage after 401");
            }
            return Ok(None);
        }

        let body = read_body(response).await;

        if status.is_client_error() || status.is_server_error() {
            let error = ApiError::from_status(status, &body);
            warn!(
                method = %method,
                path = path,
                status = status.as_u16(),
                error = %error,
                "Backend returned error status"
            );
            return Err(error);
        }

        debug!(method = %method, path = path, status = status.as_u16(), "Request completed");

        Ok(Some(body))
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiResult<Value> {
        self.request(path, RequestOptions::json(Method::POST, body)?).await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiResult<Value> {
        self.request(path, RequestOptions::json(Method::PUT, body)?).await
    }

    /// POST with no body, for action endpoints such as approve or generate
    pub async fn trigger(&self, path: &str) -> ApiResult<Value> {
        self.request(path, RequestOptions::empty(Method::POST)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.request(path, RequestOptions::empty(Method::DELETE)).await
    }

    /// GET a list in any known envelope and decode its items
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        match self.get(path).await? {
            Some(value) => decode_list(value).map(Some),
            None => Ok(None),
        }
    }

    /// True when the backend root answers with a success status
    pub async fn check_connection(&self) -> bool {
        match self.client.get(format!("{}/", self.base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Connection check failed");
                false
            }
        }
    }
}

async fn read_body(response: reqwest::Response) -> Value {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    match response.bytes().await {
        Ok(bytes) => normalize_body(status, is_json, &bytes),
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "Failed to read response body");
            parse_failure(status)
        }
    }
}

/// JSON stays JSON, text becomes `{"message": text}`, an empty body becomes
/// `{"success": <2xx>}`; unparseable JSON becomes a synthetic error object
pub(crate) fn normalize_body(status: StatusCode, is_json: bool, bytes: &[u8]) -> Value {
    if is_json {
        return serde_json::from_slice(bytes).unwrap_or_else(|e| {
            warn!(status = status.as_u16(), error = %e, "Failed to parse JSON response");
            parse_failure(status)
        });
    }

    let text = String::from_utf8_lossy(bytes);
    if text.is_empty() {
        json!({ "success": status.is_success() })
    } else {
        json!({ "message": text })
    }
}

fn parse_failure(status: StatusCode) -> Value {
    json!({
        "error": "Failed to parse response",
        "status": status.as_u16(),
        "statusText": status.canonical_reason().unwrap_or(""),
    })
}
