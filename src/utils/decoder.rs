//! Decoding of the base64(JSON) payloads carried in chart markup

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::Series;

/// Payload decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Base64 decode error: {0}")]
    BadEncoding(#[from] base64::DecodeError),
    #[error("Unexpected payload structure: {0}")]
    BadStructure(#[from] serde_json::Error),
}

/// Decode a base64 payload and parse the bytes as JSON of shape `T`
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, DecodeError> {
    let bytes = BASE64.decode(payload.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode the hour labels payload (`data-labels`)
pub fn decode_labels(payload: &str) -> Result<Vec<u32>, DecodeError> {
    decode(payload)
}

/// Decode the price series payload (`data-datasets`)
pub fn decode_series(payload: &str) -> Result<Vec<Series>, DecodeError> {
    decode(payload)
}
