//! Client for the HNAP management protocol of Motorola/Arris cable modems.
//!
//! [`Gatherer`] is the entry point: `login()` runs the HMAC challenge/response
//! handshake, `gather()` fetches every status action in one
//! `GetMultipleHNAPs` call and decodes the channel tables.

pub mod actions;
pub mod device;
pub mod digest;
pub mod envelope;
pub mod gatherer;
pub mod plustable;
pub mod records;
pub mod session;
pub mod transport;

pub use gatherer::{Collection, DeviceInfo, Gatherer};
pub use records::{DownstreamChannel, UpstreamChannel};
