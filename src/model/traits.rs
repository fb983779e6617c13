use crate::error::{CollectorError, Result, StorageError};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;

/// Trait for types that can be converted to InfluxDB data points.
///
/// Implementors must be thread-safe (Send + Sync) so collectors can run
/// concurrently.
pub trait DataPointBuilder: Send + Sync {
    /// Converts the metric into an InfluxDB DataPoint.
    fn to_point(&self) -> Result<DataPoint, StorageError>;
}

/// Trait for types that poll a source and produce metrics.
#[async_trait]
pub trait MetricCollector: Send + Sync {
    /// Collects metrics, stamping them with `timestamp`.
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError>;
}
