//! Sink write outcome models

/// Per-sink outcome of one write pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub time_series_ok: bool,
    /// `None` when no relational sink is configured
    pub relational_ok: Option<bool>,
    pub points_written: usize,
}

