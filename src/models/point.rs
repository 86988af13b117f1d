//! Price point models

use chrono::{DateTime, FixedOffset};

/// One hourly price, ready to be written to the sinks
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// Start of the hour in the run's local time zone
    pub timestamp: DateTime<FixedOffset>,
    pub area: String,
    pub hour: u32,
    pub price: f64,
}
