#![cfg(feature = "excel")]

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::{ExtractionResult, FormatError};
use crate::types::{Grid, Row, WorkbookResult};

use super::adapter::WorkbookAdapter;
use super::observability::ExtractionContext;
use super::workbook::{process_workbook_with_options, report_outcome, ExtractionOptions};

/// File extensions the calamine adapter accepts (case-insensitive).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A [`WorkbookAdapter`] backed by a calamine workbook (`.xlsx`, `.xls`, `.ods`, etc.).
///
/// Grids are materialized the way a spreadsheet shows them:
/// - cells render as display text (`1` not `1.0`, `TRUE`/`FALSE`, `#DIV/0!`, empty as `""`)
/// - dates render as their serial number (`45123.5`), since number formats are not read
/// - empty rows/columns before the first used cell are kept, so column positions match the sheet
/// - trailing empty cells of each row are dropped, so short rows stay short
pub struct CalamineWorkbook<RS> {
    workbook: Sheets<RS>,
    label: String,
}

impl CalamineWorkbook<BufReader<File>> {
    /// Open a workbook file. The format is picked from the file extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        check_extension(path)?;

        let workbook = open_workbook_auto(path).map_err(|e| {
            FormatError::workbook(format!("failed to open workbook '{}': {e}", path.display()))
        })?;

        Ok(Self {
            workbook,
            label: path.display().to_string(),
        })
    }
}

impl CalamineWorkbook<Cursor<Vec<u8>>> {
    /// Open a workbook held in memory (e.g. an upload body). The format is sniffed from content.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FormatError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(data))
            .map_err(|e| FormatError::workbook(format!("failed to open workbook: {e}")))?;

        Ok(Self {
            workbook,
            label: "bytes".to_string(),
        })
    }
}

impl<RS> CalamineWorkbook<RS> {
    /// Replace the label reported to observers.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<RS: Read + Seek> WorkbookAdapter for CalamineWorkbook<RS> {
    fn list_sheets(&mut self) -> Result<Vec<String>, FormatError> {
        Ok(self.workbook.sheet_names())
    }

    fn get_grid(&mut self, sheet: &str) -> Result<Grid, FormatError> {
        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| FormatError::sheet(sheet, format!("failed to get rows from sheet {sheet}: {e}")))?;
        Ok(range_to_grid(&range))
    }

    fn source_label(&self) -> String {
        self.label.clone()
    }
}

/// Open the workbook at `path` and process all of its sheets.
///
/// Open failures (unsupported extension, unreadable or corrupt file) are reported to
/// `options.observer` like any other failure.
///
/// ```no_run
/// use sheet_records::extraction::{extract_from_path, ExtractionOptions};
///
/// # fn main() -> Result<(), sheet_records::ExtractionError> {
/// let result = extract_from_path("workbook.xlsx", &ExtractionOptions::default())?;
/// for sheet in &result.sheets {
///     println!("{}: {} records", sheet.sheet_name, sheet.data.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract_from_path(
    path: impl AsRef<Path>,
    options: &ExtractionOptions,
) -> ExtractionResult<WorkbookResult> {
    let path = path.as_ref();
    match CalamineWorkbook::open(path) {
        Ok(mut workbook) => process_workbook_with_options(&mut workbook, options),
        Err(e) => {
            let ctx = ExtractionContext {
                source: path.display().to_string(),
            };
            let result: ExtractionResult<WorkbookResult> = Err(e.into());
            report_outcome(options, &ctx, &result);
            result
        }
    }
}

fn check_extension(path: &Path) -> Result<(), FormatError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(FormatError::workbook(format!(
            "unsupported workbook extension '{ext}' ({})",
            path.display()
        ))),
        None => Err(FormatError::workbook(format!(
            "cannot infer workbook format: path has no extension ({})",
            path.display()
        ))),
    }
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Row> = Vec::with_capacity(row_offset + range.height());
    rows.extend(std::iter::repeat_with(Vec::new).take(row_offset));

    for row in range.rows() {
        let mut cells: Row = Vec::with_capacity(col_offset + row.len());
        cells.extend(std::iter::repeat_with(String::new).take(col_offset));
        cells.extend(row.iter().map(cell_to_text));
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }

    Grid::new(rows)
}

fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_to_text(*f),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        // Number formats are not interpreted, so dates stay Excel serial numbers.
        Data::DateTime(dt) => float_to_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

// Whole numbers display without a fraction, as in the sheet UI.
fn float_to_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
