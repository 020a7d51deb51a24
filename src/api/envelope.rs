use crate::core::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Every list shape the backend is known to answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Data { data: Vec<T> },
    Timetable { timetable: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Data { data } => data,
            ListEnvelope::Timetable { timetable } => timetable,
        }
    }
}

/// Decode a list response, whatever envelope it arrived in
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    serde_json::from_value::<ListEnvelope<T>>(value)
        .map(ListEnvelope::into_items)
        .map_err(|e| ApiError::UnexpectedResponse(format!("expected a list: {}", e)))
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::UnexpectedResponse(e.to_string()))
}
