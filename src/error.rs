//! Error types for the HNAP modem to InfluxDB2 forwarder.
//!
//! The protocol client reports failures through [`HnapError`], which always
//! names the operation and HNAP action that produced it. The lower-level enums
//! ([`TransportError`], [`ProtocolError`], [`DecodeError`]) are kept as the
//! `source` of that wrapper so the full causal chain stays inspectable.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Modem communication and decoding errors
    #[error("HNAP error")]
    Hnap(#[from] HnapError),

    /// Metric collection errors
    #[error("collector error")]
    Collector(#[from] CollectorError),

    /// InfluxDB storage errors
    #[error("storage error")]
    Storage(#[from] StorageError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Failures while moving bytes to or from the modem.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The client-wide request timeout elapsed
    #[error("request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// Connection, TLS or body read failure
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The device answered with a non-success status
    #[error("device returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// The device answered, but not in the shape the protocol expects.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Body is not JSON or lacks a required field
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Neither `name` nor `name + "Response"` is present in the envelope
    #[error("action '{action}' missing from response envelope")]
    MissingAction { action: String },

    /// A plus-table row has the wrong number of cells
    #[error("invalid row width: expected {expected} fields but found {actual}")]
    InvalidRowWidth { expected: usize, actual: usize },
}

/// A single cell of a record could not be converted to its typed value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parse {field} from '{value}': {message}")]
pub struct DecodeError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

/// Failure returned by a row decoder.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors surfaced by the HNAP protocol client.
///
/// Every variant carries the operation (`login`, `gather`) and the HNAP action
/// that was in flight.
#[derive(Error, Debug)]
pub enum HnapError {
    #[error("{operation} {action}: transport failure")]
    Transport {
        operation: &'static str,
        action: String,
        #[source]
        source: TransportError,
    },

    #[error("{operation} {action}: protocol error")]
    Protocol {
        operation: &'static str,
        action: String,
        #[source]
        source: ProtocolError,
    },

    /// The device refused the credentials or the session signature
    #[error("{operation} {action}: rejected by device (status {status})")]
    AuthRejected {
        operation: &'static str,
        action: String,
        status: u16,
    },

    /// A plus-table row failed to decode; the whole gather is abandoned
    #[error("{operation} {action}: row {index} {row:?} could not be decoded")]
    Record {
        operation: &'static str,
        action: String,
        index: usize,
        row: Vec<String>,
        #[source]
        source: RecordError,
    },

    /// `gather` was called before a successful `login`
    #[error("{operation}: no session established, login first")]
    NotAuthenticated { operation: &'static str },
}

/// Metric collection errors.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Data source error
    #[error("failed to collect from modem: {0}")]
    Source(#[from] HnapError),

    /// Circuit breaker is open
    #[error("circuit breaker open for collector '{name}'")]
    CircuitOpen { name: String },
}

/// InfluxDB storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// InfluxDB client error
    #[error("InfluxDB error: {0}")]
    Client(#[from] influxdb2::RequestError),

    /// Invalid data point
    #[error("invalid data point: {0}")]
    InvalidDataPoint(String),
}

impl ConfigError {
    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl TransportError {
    /// Classifies a reqwest failure, splitting out timeouts.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Request(err)
        }
    }
}

impl ProtocolError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn missing_action(action: impl Into<String>) -> Self {
        Self::MissingAction {
            action: action.into(),
        }
    }
}

impl DecodeError {
    /// Creates a decode error for `field` whose cell held `value`.
    pub fn new(field: &'static str, value: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self {
            field,
            value: value.into(),
            message: err.to_string(),
        }
    }
}

impl HnapError {
    pub fn transport(
        operation: &'static str,
        action: impl Into<String>,
        source: TransportError,
    ) -> Self {
        Self::Transport {
            operation,
            action: action.into(),
            source,
        }
    }

    pub fn protocol(
        operation: &'static str,
        action: impl Into<String>,
        source: ProtocolError,
    ) -> Self {
        Self::Protocol {
            operation,
            action: action.into(),
            source,
        }
    }

    pub fn auth_rejected(operation: &'static str, action: impl Into<String>, status: u16) -> Self {
        Self::AuthRejected {
            operation,
            action: action.into(),
            status,
        }
    }

    /// True when the device refused the session and a fresh login is needed.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::AuthRejected { .. })
    }
}

impl CollectorError {
    /// Creates a circuit open error.
    pub fn circuit_open(name: impl Into<String>) -> Self {
        Self::CircuitOpen { name: name.into() }
    }
}
