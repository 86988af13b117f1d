use async_trait::async_trait;
use sqlx::mysql::MySqlConnection;
use sqlx::{Connection, Executor, Statement};
use tracing::{debug, warn};

use crate::models::PricePoint;
use crate::services::sink_service::{PriceSink, SinkKind, WriteError};
use crate::utils::clean_db_error;

pub const INSERT_PRICE: &str =
    "INSERT INTO pricesbyhour(year, month, day, hour, epoch, area, price) VALUES (?, ?, ?, ?, ?, ?, ?)";

/// Column values for one `pricesbyhour` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    /// UTC, `YYYY-MM-DD HH:MM:SS`
    pub epoch: String,
    pub area: String,
    /// Price in cents (truncated)
    pub price: i64,
}

/// Price to integer cents, truncating toward zero (1.999 -> 199)
pub fn to_cents(price: f64) -> i64 {
    (price * 100.0) as i64
}

/// Map a point onto the relational columns
pub fn price_row(point: &PricePoint) -> PriceRow {
    use chrono::{Datelike, Utc};

    let local_date = point.timestamp.date_naive();
    PriceRow {
        year: local_date.year(),
        month: local_date.month(),
        day: local_date.day(),
        hour: point.hour,
        epoch: point
            .timestamp
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        area: point.area.clone(),
        price: to_cents(point.price),
    }
}

/// Relational (MariaDB/MySQL) sink, one connection per write
pub struct MySqlSink {
    dsn: String,
}

impl MySqlSink {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self { dsn: dsn.into() }
    }
}

fn relational_error(hour: Option<u32>, e: sqlx::Error) -> WriteError {
    WriteError::RelationalSinkFailed {
        hour,
        reason: clean_db_error(&e.to_string()),
    }
}

/// Prepare the insert once and execute it per point, stopping at the first failure
pub async fn insert_points(conn: &mut MySqlConnection, points: &[PricePoint]) -> Result<(), WriteError> {
    let statement = (&mut *conn)
        .prepare(INSERT_PRICE)
        .await
        .map_err(|e| relational_error(None, e))?;

    for point in points {
        let row = price_row(point);
        statement
            .query()
            .bind(row.year)
            .bind(row.month)
            .bind(row.day)
            .bind(row.hour)
            .bind(row.epoch)
            .bind(row.area)
            .bind(row.price)
            .execute(&mut *conn)
            .await
            .map_err(|e| relational_error(Some(point.hour), e))?;
    }

    Ok(())
}

#[async_trait]
impl PriceSink for MySqlSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Relational
    }

    async fn write_points(&self, points: &[PricePoint]) -> Result<(), WriteError> {
        let mut conn = MySqlConnection::connect(&self.dsn)
            .await
            .map_err(|e| relational_error(None, e))?;

        let result = insert_points(&mut conn, points).await;

        // Closing also releases the prepared statement
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection: {}", e);
        }

        if result.is_ok() {
            debug!("Inserted {} rows into pricesbyhour", points.len());
        }
        result
    }
}
