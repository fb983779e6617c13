use std::time::Duration;

use crate::error::{Result, StorageError};
use crate::hnap::{DeviceInfo, DownstreamChannel, UpstreamChannel};
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;

use super::traits::DataPointBuilder;
use super::Measurement;

fn timestamp_nanos(timestamp: &DateTime<Local>) -> Result<i64, StorageError> {
    timestamp
        .timestamp_nanos_opt()
        .ok_or_else(|| StorageError::InvalidDataPoint("Timestamp overflow".to_string()))
}

fn flag(value: bool) -> i64 {
    i64::from(value)
}

/// One downstream channel at one poll.
///
/// Tagged by channel position, channel id and modulation so a re-ordered table
/// still lands in the same series.
#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamChannelMetric {
    pub channel: DownstreamChannel,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for DownstreamChannelMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        let channel = &self.channel;
        DataPoint::builder(Measurement::DownstreamChannel.to_string().as_str())
            .tag("channel", channel.index.to_string())
            .tag("channel_id", channel.channel_id.to_string())
            .tag("modulation", channel.modulation.clone())
            .field("locked", flag(channel.is_locked()))
            .field("frequency_hz", channel.frequency_hz)
            .field("power_dbmv", channel.power_dbmv)
            .field("snr_db", channel.snr_db)
            .field("corrected", channel.corrected)
            .field("uncorrected", channel.uncorrected)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| StorageError::InvalidDataPoint(format!("Failed to build DownstreamChannelMetric: {}", e)))
    }
}

/// One upstream channel at one poll.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamChannelMetric {
    pub channel: UpstreamChannel,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for UpstreamChannelMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        let channel = &self.channel;
        DataPoint::builder(Measurement::UpstreamChannel.to_string().as_str())
            .tag("channel", channel.index.to_string())
            .tag("channel_id", channel.channel_id.to_string())
            .tag("modulation", channel.channel_type.clone())
            .field("locked", flag(channel.is_locked()))
            .field("frequency_hz", channel.frequency_hz)
            .field("power_dbmv", channel.power_dbmv)
            .field("symbol_rate", channel.symbol_rate)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| StorageError::InvalidDataPoint(format!("Failed to build UpstreamChannelMetric: {}", e)))
    }
}

/// Modem identity and link state.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfoMetric {
    pub device: DeviceInfo,
    pub timestamp: DateTime<Local>,
}

impl DeviceInfoMetric {
    /// Returns `None` unless every identity label is known, so partial
    /// replies never open a new series.
    pub fn new(device: DeviceInfo, timestamp: DateTime<Local>) -> Option<Self> {
        let labels = [
            &device.serial_number,
            &device.software_version,
            &device.hardware_version,
            &device.spec_version,
            &device.customer_version,
            &device.boot_file,
        ];
        if labels.iter().any(|label| label.is_empty()) {
            return None;
        }
        Some(Self { device, timestamp })
    }
}

impl DataPointBuilder for DeviceInfoMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        let device = &self.device;
        let mut builder = DataPoint::builder(Measurement::Device.to_string().as_str())
            .tag("serial", device.serial_number.clone())
            .tag("software_version", device.software_version.clone())
            .tag("hardware_version", device.hardware_version.clone())
            .tag("spec_version", device.spec_version.clone())
            .tag("customer_version", device.customer_version.clone())
            .tag("boot_file", device.boot_file.clone())
            .field("connected", flag(device.online))
            .field("network_access", flag(device.network_access));
        if let Some(uptime) = device.uptime {
            let seconds = i64::try_from(uptime.as_secs())
                .map_err(|_| StorageError::InvalidDataPoint("Uptime overflow".to_string()))?;
            builder = builder.field("uptime_seconds", seconds);
        }
        if let Some(frequency) = device.downstream_frequency_hz {
            builder = builder.field("downstream_frequency_hz", frequency);
        }

        builder
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| StorageError::InvalidDataPoint(format!("Failed to build DeviceInfoMetric: {}", e)))
    }
}

/// Timing of a whole poll.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionMetric {
    pub duration: Duration,
    pub downstream_channels: usize,
    pub upstream_channels: usize,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for CollectionMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        DataPoint::builder(Measurement::Collection.to_string().as_str())
            .field("duration_seconds", self.duration.as_secs_f64())
            .field("downstream_channels", self.downstream_channels as i64)
            .field("upstream_channels", self.upstream_channels as i64)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| StorageError::InvalidDataPoint(format!("Failed to build CollectionMetric: {}", e)))
    }
}
