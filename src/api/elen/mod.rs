pub mod client;
pub mod models;

pub use client::ElenClient;
pub use models::{FetchError, FetchedPage};
