use async_trait::async_trait;
use influxdb::{Client, Timestamp, WriteQuery};
use tracing::debug;

use crate::config::InfluxConfig;
use crate::models::PricePoint;
use crate::services::sink_service::{PriceSink, SinkKind, WriteError};

pub const MEASUREMENT: &str = "powerprices";

/// Time-series (InfluxDB) sink
pub struct InfluxSink {
    client: Client,
}

impl InfluxSink {
    pub fn new(config: &InfluxConfig) -> Self {
        let client = Client::new(config.server.as_str(), config.database.as_str());
        let client = match (&config.user, &config.password) {
            (Some(user), password) => {
                client.with_auth(user.as_str(), password.as_deref().unwrap_or_default())
            }
            (None, _) => client,
        };

        Self { client }
    }
}

/// One write query per point, hour precision, tagged with hour and area
pub fn build_batch(points: &[PricePoint]) -> Result<Vec<WriteQuery>, WriteError> {
    points
        .iter()
        .map(|point| {
            let hours = u128::try_from(point.timestamp.timestamp().div_euclid(3600)).map_err(|_| {
                WriteError::TimeSeriesSinkFailed(format!("timestamp {} before epoch", point.timestamp))
            })?;

            Ok(WriteQuery::new(Timestamp::Hours(hours), MEASUREMENT)
                .add_tag("hour", point.hour.to_string())
                .add_tag("area", point.area.as_str())
                .add_field("value", point.price))
        })
        .collect()
}

#[async_trait]
impl PriceSink for InfluxSink {
    fn kind(&self) -> SinkKind {
        SinkKind::TimeSeries
    }

    async fn write_points(&self, points: &[PricePoint]) -> Result<(), WriteError> {
        let batch = build_batch(points)?;
        if batch.is_empty() {
            debug!("No points to write to {}", self.client.database_name());
            return Ok(());
        }

        // The whole batch goes in one request
        self.client
            .query(batch)
            .await
            .map_err(|e| WriteError::TimeSeriesSinkFailed(e.to_string()))?;

        debug!("Wrote {} points to {}", points.len(), self.client.database_name());
        Ok(())
    }
}
