//! Metric types for modem telemetry and their InfluxDB data points.

pub mod metrics;
pub mod traits;
pub mod types;
pub mod utilities;

pub use metrics::{
    CollectionMetric, DeviceInfoMetric, DownstreamChannelMetric, UpstreamChannelMetric,
};
pub use traits::{DataPointBuilder, MetricCollector};
pub use types::Measurement;
pub use utilities::batch_collect_metrics;
