//! `sheet-records` converts spreadsheet workbooks into header-keyed, typed records.
//!
//! Every sheet is read as a grid of cell text. Its first row becomes the headers, and every
//! following row becomes one [`types::Record`] mapping header → [`types::CellValue`]. Results are
//! collected per sheet, in workbook order, into a [`types::WorkbookResult`].
//!
//! The primary entrypoint is [`extraction::process_workbook`], which works against any
//! [`extraction::WorkbookAdapter`]. With the `excel` feature (on by default),
//! [`extraction::extract_from_path`] opens `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, and `.ods` files via
//! calamine.
//!
//! ## Coercion
//!
//! A cell becomes [`types::CellValue::Number`] only when its *entire* text parses as an `f64`
//! (`"3.14"`, `"1e10"`, `"-7"`). Everything else, including `"12abc"` and the empty string, is
//! kept as [`types::CellValue::Text`]. Coercion never fails.
//!
//! ## Shape rules
//!
//! - Rows shorter than the header row produce records without the missing keys (no null filling).
//! - Cells beyond the last header are dropped.
//! - Repeated header names: the later cell wins.
//! - A sheet needs a header row plus at least one data row. The first sheet that does not have
//!   one aborts the whole workbook; no partial result is returned.
//!
//! ## Quick example
//!
//! ```rust
//! use sheet_records::extraction::{process_workbook, MemoryWorkbook};
//! use sheet_records::response::ExtractionResponse;
//! use sheet_records::types::{CellValue, Grid};
//!
//! let mut workbook = MemoryWorkbook::new()
//!     .with_sheet("People", Grid::from_rows([vec!["id", "name"], vec!["1", "Ada"]]))
//!     .with_sheet("Scores", Grid::from_rows([vec!["score"], vec!["98.5"], vec!["n/a"]]));
//!
//! let result = process_workbook(&mut workbook).unwrap();
//! assert_eq!(result.sheet_names().collect::<Vec<_>>(), vec!["People", "Scores"]);
//!
//! let scores = result.sheet("Scores").unwrap();
//! assert_eq!(scores.data[0].get("score"), Some(&CellValue::Number(98.5)));
//! assert_eq!(scores.data[1].get("score"), Some(&CellValue::Text("n/a".to_string())));
//!
//! let json = ExtractionResponse::new(result).to_json().unwrap();
//! assert!(json.starts_with(r#"{"message":"File processed successfully","data":[{"sheetName":"People""#));
//! ```
//!
//! ## Modules
//!
//! - [`extraction`]: adapters, per-sheet processing, workbook aggregation, observability
//! - [`types`]: grids, records, and per-sheet/workbook results
//! - [`response`]: JSON success/error bodies for a transport layer
//! - [`error`]: error types used across extraction

pub mod error;
pub mod extraction;
pub mod response;
pub mod types;

pub use error::{ExtractionError, ExtractionResult, FormatError};
