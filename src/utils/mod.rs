pub mod decoder;
pub mod errors;

pub use errors::{clean_db_error, RunError};
