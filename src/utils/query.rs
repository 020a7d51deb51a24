use crate::core::error::ApiError;
use serde::Serialize;

/// Append `params` to `path` as a query string; no `?` when nothing is set
pub fn with_query<T: Serialize>(path: &str, params: &T) -> Result<String, ApiError> {
    let query = serde_urlencoded::to_string(params)
        .map_err(|e| ApiError::Request(format!("Failed to encode query: {}", e)))?;

    if query.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

/// Join a collection path and an id: `/admin/courses` + 7 -> `/admin/courses/7`
pub fn item_path(collection: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), id)
}
