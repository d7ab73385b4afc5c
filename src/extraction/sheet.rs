//! Per-sheet processing.

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{Grid, SheetResult};

use super::headers::resolve_headers;
use super::row::decode_row;

/// Smallest grid a sheet may have: one header row plus one data row.
pub const MIN_SHEET_ROWS: usize = 2;

/// Turn one sheet's grid into a [`SheetResult`].
///
/// Fails with [`ExtractionError::Sheet`] when the grid has fewer than [`MIN_SHEET_ROWS`] rows.
/// Otherwise every row after the header is decoded in order, so the result always holds
/// `grid.row_count() - 1` records.
pub fn process_sheet(sheet_name: &str, grid: &Grid) -> ExtractionResult<SheetResult> {
    if grid.row_count() < MIN_SHEET_ROWS {
        return Err(ExtractionError::sheet(
            sheet_name,
            "empty or has no data rows",
        ));
    }

    let resolved = resolve_headers(sheet_name, grid)?;
    let data = resolved
        .data_rows
        .iter()
        .map(|row| decode_row(resolved.headers, row))
        .collect();

    Ok(SheetResult {
        sheet_name: sheet_name.to_string(),
        headers: resolved.headers.to_vec(),
        data,
    })
}
