use thiserror::Error;

use crate::api::elen::FetchError;
use crate::config::ConfigError;
use crate::services::extract_service::ExtractError;
use crate::services::sink_service::WriteError;

/// Anything that ends a run early
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("Write failed: {0}")]
    Write(#[from] WriteError),
}

impl RunError {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) => 2,
            RunError::Fetch(_) => 3,
            RunError::Extract(_) => 4,
            RunError::Write(_) => 5,
        }
    }
}

const DB_ERROR_PREFIX: &str = "error returned from database:";

/// Strip the driver prefix and MySQL error code from a database error
///
/// "error returned from database: 1146 (42S02): Table 'power.pricesbyhour' doesn't exist"
/// becomes "Table 'power.pricesbyhour' doesn't exist". Other messages pass through.
pub fn clean_db_error(message: &str) -> String {
    match message.split_once(DB_ERROR_PREFIX) {
        Some((_, server_part)) => server_part
            .rsplit(": ")
            .next()
            .unwrap_or(server_part)
            .trim()
            .to_string(),
        None => message.to_string(),
    }
}
