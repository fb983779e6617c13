//! Typed decoders for the channel tables.
//!
//! Column layout, as rendered by the modem's own status page:
//!
//! | table      | columns                                                                             |
//! |------------|-------------------------------------------------------------------------------------|
//! | downstream | channel, lock status, modulation, channel id, freq (MHz), pwr (dBmV), SNR (dB), corrected, uncorrected |
//! | upstream   | channel, lock status, channel type, channel id, symb. rate (Ksym/sec), freq (MHz), pwr (dBmV) |
//!
//! The firmware terminates every row with `^`, so a captured row carries one
//! extra empty cell. The final row of an upstream table sometimes lacks it.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{DecodeError, ProtocolError, RecordError};
use crate::hnap::plustable::Row;

/// Lock status value reported for a locked channel.
pub const LOCKED: &str = "Locked";

const HZ_PER_MHZ: f64 = 1_000_000.0;
const SYMBOLS_PER_KSYM: i64 = 1_000;

/// A record decoded from one plus-table row.
pub trait ChannelRecord: Sized {
    /// Number of meaningful cells in a row.
    const WIDTH: usize;

    /// Decodes an already-split row.
    fn decode(row: &[String]) -> Result<Self, RecordError>;
}

/// A downstream (modem receive) channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamChannel {
    pub index: i64,
    pub lock_status: String,
    pub modulation: String,
    pub channel_id: i64,
    pub frequency_hz: f64,
    pub power_dbmv: f64,
    pub snr_db: f64,
    pub corrected: i64,
    pub uncorrected: i64,
}

impl DownstreamChannel {
    pub fn is_locked(&self) -> bool {
        self.lock_status == LOCKED
    }
}

impl ChannelRecord for DownstreamChannel {
    const WIDTH: usize = 9;

    fn decode(row: &[String]) -> Result<Self, RecordError> {
        let cells = Cells::new(row, Self::WIDTH)?;

        Ok(Self {
            index: cells.parse(0, "index")?,
            lock_status: cells.text(1),
            modulation: cells.text(2),
            channel_id: cells.parse(3, "channel id")?,
            frequency_hz: cells.parse::<f64>(4, "frequency")? * HZ_PER_MHZ,
            power_dbmv: cells.parse(5, "power")?,
            snr_db: cells.parse(6, "signal to noise ratio")?,
            corrected: cells.parse(7, "corrected count")?,
            uncorrected: cells.parse(8, "uncorrected count")?,
        })
    }
}

/// An upstream (modem transmit) channel.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamChannel {
    pub index: i64,
    pub lock_status: String,
    pub channel_type: String,
    pub channel_id: i64,
    pub symbol_rate: i64,
    pub frequency_hz: f64,
    pub power_dbmv: f64,
}

impl UpstreamChannel {
    pub fn is_locked(&self) -> bool {
        self.lock_status == LOCKED
    }
}

impl ChannelRecord for UpstreamChannel {
    const WIDTH: usize = 7;

    fn decode(row: &[String]) -> Result<Self, RecordError> {
        let cells = Cells::new(row, Self::WIDTH)?;

        let ksym: i64 = cells.parse(4, "symbol rate")?;
        let symbol_rate = ksym
            .checked_mul(SYMBOLS_PER_KSYM)
            .ok_or_else(|| DecodeError::new("symbol rate", cells.raw(4), "value overflows i64"))?;

        Ok(Self {
            index: cells.parse(0, "index")?,
            lock_status: cells.text(1),
            channel_type: cells.text(2),
            channel_id: cells.parse(3, "channel id")?,
            symbol_rate,
            frequency_hz: cells.parse::<f64>(5, "frequency")? * HZ_PER_MHZ,
            power_dbmv: cells.parse(6, "power")?,
        })
    }
}

/// A row that failed to decode, with its position in the table.
#[derive(Debug)]
pub struct RowFailure {
    pub index: usize,
    pub row: Row,
    pub source: RecordError,
}

/// Decodes every row of a parsed table, stopping at the first failure.
///
/// A final row made of a single empty cell comes from a terminal row
/// separator and is skipped.
pub fn decode_table<R: ChannelRecord>(rows: &[Row]) -> Result<Vec<R>, RowFailure> {
    let rows = match rows.split_last() {
        Some((last, rest)) if last.len() == 1 && last[0].is_empty() => rest,
        _ => rows,
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            R::decode(row).map_err(|source| {
                tracing::warn!(index, ?row, error = %source, "could not decode table row");
                RowFailure {
                    index,
                    row: row.clone(),
                    source,
                }
            })
        })
        .collect()
}

/// Width-checked view over the meaningful cells of a row.
struct Cells<'a> {
    cells: &'a [String],
}

impl<'a> Cells<'a> {
    fn new(row: &'a [String], expected: usize) -> Result<Self, ProtocolError> {
        let cells = match row.split_last() {
            Some((last, rest)) if last.is_empty() => rest,
            _ => row,
        };
        if cells.len() != expected {
            return Err(ProtocolError::InvalidRowWidth {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { cells })
    }

    fn raw(&self, i: usize) -> &str {
        &self.cells[i]
    }

    fn text(&self, i: usize) -> String {
        self.cells[i].trim().to_string()
    }

    fn parse<T>(&self, i: usize, field: &'static str) -> Result<T, DecodeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.cells[i].trim();
        value
            .parse()
            .map_err(|e| DecodeError::new(field, value, e))
    }
}
