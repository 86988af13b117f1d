//! Data models for the price pipeline
//!
//! This module organizes the structs passed between pipeline stages.
//! Each model is produced by one service and consumed by the next.

pub mod chart;
pub mod point;
pub mod report;

// Re-export commonly used types for convenience
pub use chart::{DecodedChart, EncodedChart, Series};
pub use point::PricePoint;
pub use report::WriteReport;
