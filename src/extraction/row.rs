//! Data row decoding.

use crate::types::Record;

use super::coerce::coerce_cell;

/// Decode one data row into a [`Record`] keyed by `headers`.
///
/// Cells pair with headers by position. Headers past the end of a short row are left out of the
/// record, and cells past the last header are dropped. When a header name repeats, the later
/// cell's value wins.
pub fn decode_row(headers: &[String], row: &[String]) -> Record {
    let mut record = Record::with_capacity(headers.len().min(row.len()));
    for (header, cell) in headers.iter().zip(row) {
        record.insert(header.as_str(), coerce_cell(cell));
    }
    record
}
