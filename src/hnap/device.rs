//! Non-table sub-payloads of the status batch.

use std::time::Duration;

use serde_derive::Deserialize;

pub const CONNECTED: &str = "Connected";
pub const ALLOWED: &str = "Allowed";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SoftwareStatus {
    #[serde(rename = "StatusSoftwareSpecVer")]
    pub spec_version: String,
    #[serde(rename = "StatusSoftwareHdVer")]
    pub hardware_version: String,
    #[serde(rename = "StatusSoftwareSfVer")]
    pub software_version: String,
    #[serde(rename = "StatusSoftwareMac")]
    pub hardware_address: String,
    #[serde(rename = "StatusSoftwareSerialNum")]
    pub serial_number: String,
    #[serde(rename = "StatusSoftwareCustomerVer")]
    pub customer_version: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StartupSequence {
    #[serde(rename = "MotoConnDSFreq")]
    pub downstream_frequency: String,
    #[serde(rename = "MotoConnConfigurationFileComment")]
    pub boot_file: String,
}

impl StartupSequence {
    /// Primary downstream frequency, reported as e.g. `"663000000 Hz"`.
    pub fn downstream_frequency_hz(&self) -> Option<f64> {
        self.downstream_frequency
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HomeConnection {
    #[serde(rename = "MotoHomeOnline")]
    pub online: String,
    #[serde(rename = "MotoHomeDownNum")]
    pub downstream_channels: String,
    #[serde(rename = "MotoHomeUpNum")]
    pub upstream_channels: String,
}

impl HomeConnection {
    pub fn is_online(&self) -> bool {
        self.online == CONNECTED
    }

    /// Channel counts as advertised by the device, when they parse.
    pub fn channel_counts(&self) -> (Option<usize>, Option<usize>) {
        (
            self.downstream_channels.trim().parse().ok(),
            self.upstream_channels.trim().parse().ok(),
        )
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConnectionInfo {
    #[serde(rename = "MotoConnSystemUpTime")]
    pub uptime: String,
    #[serde(rename = "MotoConnNetworkAccess")]
    pub network_access: String,
}

impl ConnectionInfo {
    pub fn uptime(&self) -> Option<Duration> {
        parse_uptime(&self.uptime)
    }

    pub fn network_access_allowed(&self) -> bool {
        self.network_access == ALLOWED
    }
}

/// Table-bearing payloads.
#[derive(Deserialize, Debug)]
pub struct DownstreamChannelInfo {
    #[serde(rename = "MotoConnDownstreamChannel")]
    pub table: String,
}

#[derive(Deserialize, Debug)]
pub struct UpstreamChannelInfo {
    #[serde(rename = "MotoConnUpstreamChannel")]
    pub table: String,
}

/// Parses the device uptime format, e.g. `"4 days 08h:57m:40s"`.
pub fn parse_uptime(text: &str) -> Option<Duration> {
    let mut parts = text.split_whitespace();
    let days: u64 = parts.next()?.parse().ok()?;
    if !parts.next()?.starts_with("day") {
        return None;
    }
    let clock = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let mut units = clock.split(':');
    let mut component = |suffix: char| -> Option<u64> {
        units.next()?.strip_suffix(suffix)?.parse().ok()
    };
    let hours = component('h')?;
    let minutes = component('m')?;
    let seconds = component('s')?;
    if units.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = days
        .checked_mul(24)?
        .checked_add(hours)?
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?;
    Some(Duration::from_secs(total))
}
