use chrono::{DateTime, Local};
use futures::future::join_all;
use influxdb2::models::DataPoint;

use super::traits::MetricCollector;
use crate::error::CollectorError;

/// Collects metrics from multiple collectors concurrently.
///
/// Failed collections or conversions are logged and dropped; they never stop
/// the other collectors.
pub async fn batch_collect_metrics(
    clients: &[Box<dyn MetricCollector>],
    timestamp: DateTime<Local>,
) -> Vec<DataPoint> {
    let results = join_all(clients.iter().map(|client| client.collect(timestamp))).await;

    results
        .into_iter()
        .filter_map(|res| match res {
            Ok(builders) => Some(builders),
            Err(e @ CollectorError::CircuitOpen { .. }) => {
                tracing::debug!(error = %e, "Skipping collector");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to get metrics");
                None
            }
        })
        .flatten()
        .filter_map(|p| match p.to_point() {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::error!(error = %e, "Failed to convert to point");
                None
            }
        })
        .collect()
}
