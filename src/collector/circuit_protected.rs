use crate::circuit_breaker::CircuitBreaker;
use crate::error::{CollectorError, Result};
use crate::model::{DataPointBuilder, MetricCollector};
use chrono::{DateTime, Local};
use std::sync::Arc;

/// A wrapper that adds circuit breaker protection to any MetricCollector.
///
/// While the circuit is open the inner collector is not called at all, so a
/// modem that keeps refusing logins is left alone until the recovery timeout.
pub struct CircuitProtectedCollector {
    inner: Arc<dyn MetricCollector>,
    circuit_breaker: CircuitBreaker,
    name: String,
}

impl CircuitProtectedCollector {
    pub fn new(
        name: impl Into<String>,
        inner: Arc<dyn MetricCollector>,
        circuit_breaker: CircuitBreaker,
    ) -> Self {
        Self {
            inner,
            circuit_breaker,
            name: name.into(),
        }
    }
}

#[async_trait::async_trait]
impl MetricCollector for CircuitProtectedCollector {
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        if !self.circuit_breaker.call_allowed().await {
            return Err(CollectorError::circuit_open(&self.name));
        }

        match self.inner.collect(timestamp).await {
            Ok(data_points) => {
                self.circuit_breaker.record_success().await;
                tracing::trace!(
                    collector = %self.name,
                    count = data_points.len(),
                    "Collection succeeded"
                );
                Ok(data_points)
            }
            Err(err) => {
                self.circuit_breaker.record_failure().await;
                if self.circuit_breaker.is_open().await {
                    tracing::warn!(
                        collector = %self.name,
                        "Circuit breaker is now OPEN due to repeated failures"
                    );
                }
                Err(err)
            }
        }
    }
}
