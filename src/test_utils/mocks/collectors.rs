//! Mock implementations of MetricCollector for testing.

use crate::error::{CollectorError, HnapError, Result, StorageError};
use crate::model::{DataPointBuilder, MetricCollector, UpstreamChannelMetric};
use crate::test_utils::fixtures;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock metric collector that can be configured to succeed or fail.
pub struct MockMetricCollector {
    should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockMetricCollector {
    /// Creates a mock collector that returns one upstream channel point.
    pub fn new_success() -> Self {
        Self {
            should_fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a mock collector that fails as if the modem had no session.
    pub fn new_failure() -> Self {
        Self {
            should_fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `collect` calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl MetricCollector for MockMetricCollector {
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(HnapError::NotAuthenticated {
                operation: "gather",
            }
            .into());
        }
        Ok(vec![Box::new(UpstreamChannelMetric {
            channel: fixtures::upstream_channel(),
            timestamp,
        })])
    }
}

/// A data point builder whose conversion always fails.
pub struct FailingDataPointBuilder;

impl DataPointBuilder for FailingDataPointBuilder {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        Err(StorageError::InvalidDataPoint(
            "Intentional failure for testing".to_string(),
        ))
    }
}
