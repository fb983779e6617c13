use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::{CollectorError, Result};
use crate::hnap::{Collection, Gatherer};
use crate::model::{
    CollectionMetric, DataPointBuilder, DeviceInfoMetric, DownstreamChannelMetric,
    MetricCollector, UpstreamChannelMetric,
};

/// Polls the modem once per call: a fresh login followed by one gather.
pub struct ModemMetricCollector {
    gatherer: Arc<Gatherer>,
}

impl ModemMetricCollector {
    pub fn new(gatherer: Arc<Gatherer>) -> Self {
        Self { gatherer }
    }
}

#[async_trait]
impl MetricCollector for ModemMetricCollector {
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        let started = Instant::now();
        self.gatherer.login().await.inspect_err(|e| {
            if e.is_auth_rejected() {
                tracing::warn!("modem rejected the configured credentials");
            }
        })?;
        let collection = self.gatherer.gather().await?;
        let elapsed = started.elapsed();

        tracing::info!(
            downstream = collection.downstream.len(),
            upstream = collection.upstream.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "finished collecting"
        );
        Ok(to_metrics(collection, elapsed, timestamp))
    }
}

fn to_metrics(
    collection: Collection,
    elapsed: Duration,
    timestamp: DateTime<Local>,
) -> Vec<Box<dyn DataPointBuilder>> {
    let mut metrics: Vec<Box<dyn DataPointBuilder>> = Vec::with_capacity(
        collection.downstream.len() + collection.upstream.len() + 2,
    );

    metrics.push(Box::new(CollectionMetric {
        duration: elapsed,
        downstream_channels: collection.downstream.len(),
        upstream_channels: collection.upstream.len(),
        timestamp,
    }));

    for channel in collection.downstream {
        metrics.push(Box::new(DownstreamChannelMetric { channel, timestamp }));
    }
    for channel in collection.upstream {
        metrics.push(Box::new(UpstreamChannelMetric { channel, timestamp }));
    }

    if let Some(device) = collection.device {
        match DeviceInfoMetric::new(device, timestamp) {
            Some(metric) => metrics.push(Box::new(metric)),
            None => tracing::debug!("device identity incomplete, skipping device metric"),
        }
    }

    metrics
}
