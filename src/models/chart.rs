//! Chart payload models

use serde::Deserialize;

/// The two raw attribute values captured from the chart element
#[derive(Debug, Clone)]
pub struct EncodedChart {
    pub labels_payload: String,
    pub datasets_payload: String,
}

/// One named price series from the chart datasets
///
/// Styling fields the charting library also carries (border width, colour,
/// fill) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Series {
    #[serde(alias = "Label", default)]
    pub label: String,
    #[serde(rename = "data", alias = "Data")]
    pub values: Vec<f64>,
}

/// Decoded chart: hour labels plus every series found in the datasets
#[derive(Debug, Clone)]
pub struct DecodedChart {
    pub labels: Vec<u32>,
    pub series: Vec<Series>,
    /// Index into `series` of the one that gets persisted
    pub selected: usize,
}

impl DecodedChart {
    /// The series chosen for persistence
    pub fn selected_series(&self) -> &Series {
        &self.series[self.selected]
    }
}
