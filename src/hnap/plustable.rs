//! Parser for the modem's "plus table" encoding.
//!
//! Tabular status pages are shipped as a single JSON string where rows are
//! joined by `|+|` and cells by `^`:
//!
//! ```text
//! 1^Locked^QAM256^33^663.0^-9.3^38.8^42325^10482^|+|2^Locked^QAM256^5^...
//! ```
//!
//! The parser only splits. Cells keep their surrounding whitespace and a
//! terminal separator yields a trailing empty cell; the record decoders decide
//! what to make of both.

/// Separator between rows.
pub const ROW_SEPARATOR: &str = "|+|";

/// Separator between cells of a row.
pub const CELL_SEPARATOR: &str = "^";

/// A parsed table row.
pub type Row = Vec<String>;

/// Splits a plus-table blob into rows of cells.
///
/// An empty blob has no rows. Any other blob has `1 + count("|+|")` rows, and
/// each row has `1 + count("^")` cells within its segment.
pub fn parse(blob: &str) -> Vec<Row> {
    if blob.is_empty() {
        return Vec::new();
    }

    blob.split(ROW_SEPARATOR)
        .map(|row| row.split(CELL_SEPARATOR).map(str::to_string).collect())
        .collect()
}
