//! Extraction entrypoints and implementations.
//!
//! Most callers should use [`process_workbook`] (from [`workbook`]), which:
//!
//! - lists sheets from a [`WorkbookAdapter`] and fetches their grids in workbook order
//! - turns each grid into header-keyed records with numeric/text coercion
//! - stops at the first sheet that fails
//! - optionally reports progress/success/failure/alerts to an [`ExtractionObserver`]
//!
//! The building blocks are also available on their own:
//! - [`coerce`]: cell text → [`crate::types::CellValue`]
//! - [`headers`]: header row resolution
//! - [`row`]: data row → [`crate::types::Record`]
//! - [`sheet`]: grid → [`crate::types::SheetResult`]
//! - [`batch`]: many independent workbooks in parallel
//! - `excel` (feature `excel`): calamine-backed adapter

pub mod adapter;
pub mod batch;
pub mod coerce;
#[cfg(feature = "excel")]
pub mod excel;
pub mod headers;
pub mod observability;
pub mod row;
pub mod sheet;
pub mod workbook;

pub use adapter::{MemoryWorkbook, WorkbookAdapter};
pub use batch::{BatchOptions, BatchRunner};
pub use coerce::coerce_cell;
#[cfg(feature = "excel")]
pub use excel::{extract_from_path, CalamineWorkbook};
pub use headers::{resolve_headers, ResolvedSheet};
pub use observability::{
    CompositeObserver, ExtractionContext, ExtractionEvent, ExtractionObserver, ExtractionSeverity,
    ExtractionStats, FileObserver, StdErrObserver,
};
pub use row::decode_row;
pub use sheet::{process_sheet, MIN_SHEET_ROWS};
pub use workbook::{
    process_workbook, process_workbook_with_options, ExtractionOptions, DEFAULT_ROW_PREVIEW_LIMIT,
};
