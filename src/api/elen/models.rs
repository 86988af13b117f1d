use thiserror::Error;

/// A retrieved HTML document
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// Error type for page retrieval
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network/request error
    #[error("Request Error: {0}")]
    Request(String),
    /// Non-success HTTP status
    #[error("HTTP Error ({0}) for {1}")]
    Status(u16, String),
    /// Body could not be read
    #[error("Body Error: {0}")]
    Body(String),
}
