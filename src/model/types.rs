use std::fmt;

/// Represents the type of measurement being collected.
///
/// Each measurement type corresponds to a different InfluxDB measurement
/// (table) where the data will be stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Measurement {
    /// Per-channel receive metrics
    DownstreamChannel,
    /// Per-channel transmit metrics
    UpstreamChannel,
    /// Modem identity and link state
    Device,
    /// Metadata about the poll itself
    Collection,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::DownstreamChannel => write!(f, "downstream_channel"),
            Measurement::UpstreamChannel => write!(f, "upstream_channel"),
            Measurement::Device => write!(f, "device"),
            Measurement::Collection => write!(f, "collection"),
        }
    }
}
