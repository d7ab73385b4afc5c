//! Workbook adapter seam.
//!
//! The extraction engine never decodes spreadsheet containers itself. It asks a
//! [`WorkbookAdapter`] for sheet names and for one [`Grid`] of cell text per sheet.

use crate::error::FormatError;
use crate::types::Grid;

/// Supplies sheet names and per-sheet grids of cell text.
///
/// Methods take `&mut self` because real decoders (e.g. calamine) read lazily from an underlying
/// stream.
pub trait WorkbookAdapter {
    /// Sheet names in workbook order.
    fn list_sheets(&mut self) -> Result<Vec<String>, FormatError>;

    /// Raw cell text for the named sheet.
    fn get_grid(&mut self, sheet: &str) -> Result<Grid, FormatError>;

    /// Human-readable description of the source, used as observer context.
    fn source_label(&self) -> String {
        "workbook".to_string()
    }
}

impl<A: WorkbookAdapter + ?Sized> WorkbookAdapter for &mut A {
    fn list_sheets(&mut self) -> Result<Vec<String>, FormatError> {
        (**self).list_sheets()
    }

    fn get_grid(&mut self, sheet: &str) -> Result<Grid, FormatError> {
        (**self).get_grid(sheet)
    }

    fn source_label(&self) -> String {
        (**self).source_label()
    }
}

impl<A: WorkbookAdapter + ?Sized> WorkbookAdapter for Box<A> {
    fn list_sheets(&mut self) -> Result<Vec<String>, FormatError> {
        (**self).list_sheets()
    }

    fn get_grid(&mut self, sheet: &str) -> Result<Grid, FormatError> {
        (**self).get_grid(sheet)
    }

    fn source_label(&self) -> String {
        (**self).source_label()
    }
}

/// A workbook whose sheets are already materialized in memory.
///
/// Useful when grids come from somewhere other than a spreadsheet file, and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryWorkbook {
    label: Option<String>,
    sheets: Vec<(String, Grid)>,
}

impl MemoryWorkbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label reported by [`WorkbookAdapter::source_label`].
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a sheet. Sheets keep insertion order.
    pub fn with_sheet(mut self, name: impl Into<String>, grid: impl Into<Grid>) -> Self {
        self.push_sheet(name, grid);
        self
    }

    /// Append a sheet in place.
    pub fn push_sheet(&mut self, name: impl Into<String>, grid: impl Into<Grid>) {
        self.sheets.push((name.into(), grid.into()));
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

impl WorkbookAdapter for MemoryWorkbook {
    fn list_sheets(&mut self) -> Result<Vec<String>, FormatError> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    fn get_grid(&mut self, sheet: &str) -> Result<Grid, FormatError> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| FormatError::sheet(sheet, format!("sheet '{sheet}' does not exist")))
    }

    fn source_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| "memory".to_string())
    }
}
