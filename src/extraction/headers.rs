//! Header row resolution.

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{Grid, Row};

/// A grid split into its header row and the data rows below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSheet<'g> {
    /// Field names from the first row, verbatim.
    pub headers: &'g [String],
    /// Every row after the header row, in order.
    pub data_rows: &'g [Row],
}

/// Take the first row of `grid` as headers.
///
/// Names are not trimmed, deduplicated, or otherwise normalized. Fails only when the grid has no
/// rows at all.
pub fn resolve_headers<'g>(sheet: &str, grid: &'g Grid) -> ExtractionResult<ResolvedSheet<'g>> {
    let (headers, data_rows) = grid
        .rows
        .split_first()
        .ok_or_else(|| ExtractionError::sheet(sheet, "no header row"))?;

    Ok(ResolvedSheet {
        headers: headers.as_slice(),
        data_rows,
    })
}
