use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::elen::FetchedPage;
use crate::config::ExtractConfig;
use crate::models::{DecodedChart, EncodedChart, Series};
use crate::utils::decoder::{self, DecodeError};

pub const LABELS_ATTR: &str = "data-labels";
pub const DATASETS_ATTR: &str = "data-datasets";

/// Chart extraction errors. All of them abandon the run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No chart element found on the page")]
    ChartNotFound,
    #[error("Invalid chart selector '{0}'")]
    InvalidSelector(String),
    #[error("Invalid {0} payload{}", .1.as_ref().map(|e| format!(": {}", e)).unwrap_or_default())]
    Invalid(&'static str, #[source] Option<DecodeError>),
    #[error("Chart has {labels} labels but {prices} prices")]
    ShapeMismatch { labels: usize, prices: usize },
}

/// Locates the chart in a page and decodes its hourly series
pub struct SeriesExtractor {
    selector: Selector,
    area: String,
}

impl SeriesExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self, ExtractError> {
        let selector = Selector::parse(&config.chart_selector)
            .map_err(|_| ExtractError::InvalidSelector(config.chart_selector.clone()))?;

        Ok(Self {
            selector,
            area: config.area.clone(),
        })
    }

    /// Find the chart element and decode both payloads
    pub fn extract(&self, page: &FetchedPage) -> Result<DecodedChart, ExtractError> {
        let encoded = self.locate(page)?;
        self.decode_chart(&encoded)
    }

    /// Read the two data attributes off the first matching element
    pub fn locate(&self, page: &FetchedPage) -> Result<EncodedChart, ExtractError> {
        let document = Html::parse_document(&page.body);
        let element = document
            .select(&self.selector)
            .next()
            .ok_or(ExtractError::ChartNotFound)?;

        let labels_payload = element
            .value()
            .attr(LABELS_ATTR)
            .ok_or(ExtractError::Invalid("labels", None))?;
        let datasets_payload = element
            .value()
            .attr(DATASETS_ATTR)
            .ok_or(ExtractError::Invalid("datasets", None))?;

        debug!("Found chart element on {}", page.url);
        Ok(EncodedChart {
            labels_payload: labels_payload.to_string(),
            datasets_payload: datasets_payload.to_string(),
        })
    }

    /// Decode labels first, then the datasets, then check they line up
    pub fn decode_chart(&self, encoded: &EncodedChart) -> Result<DecodedChart, ExtractError> {
        let labels = decoder::decode_labels(&encoded.labels_payload)
            .map_err(|e| ExtractError::Invalid("labels", Some(e)))?;
        let series = decoder::decode_series(&encoded.datasets_payload)
            .map_err(|e| ExtractError::Invalid("datasets", Some(e)))?;

        debug!("Decoded {} labels and {} series", labels.len(), series.len());

        let selected = self.select_series(&series)?;
        let prices = series[selected].values.len();
        if labels.len() != prices {
            return Err(ExtractError::ShapeMismatch {
                labels: labels.len(),
                prices,
            });
        }

        Ok(DecodedChart {
            labels,
            series,
            selected,
        })
    }

    /// Prefer the series labelled with our area, else the first one
    fn select_series(&self, series: &[Series]) -> Result<usize, ExtractError> {
        if series.is_empty() {
            return Err(ExtractError::Invalid("datasets", None));
        }

        if let Some(index) = series
            .iter()
            .position(|s| s.label.eq_ignore_ascii_case(&self.area))
        {
            debug!("Using series '{}' for area {}", series[index].label, self.area);
            return Ok(index);
        }

        if series.len() > 1 {
            warn!(
                "{} series on the page and none labelled {}, using '{}'",
                series.len(),
                self.area,
                series[0].label
            );
        }
        Ok(0)
    }
}
