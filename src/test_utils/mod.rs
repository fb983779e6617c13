//! Test utilities shared across the forwarder.
//!
//! Config builders, sample HNAP payloads and in-process fakes for the modem
//! and InfluxDB.

#![cfg(test)]

pub mod config;
pub mod fixtures;
