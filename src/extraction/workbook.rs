//! Workbook aggregation entrypoint.
//!
//! Most callers should use [`process_workbook`] (or [`process_workbook_with_options`] to attach
//! an observer). Sheets are processed one at a time in the adapter's order, and the first failing
//! sheet aborts the whole call.

use std::fmt;
use std::sync::Arc;

use crate::error::{ExtractionError, ExtractionResult, FormatError};
use crate::types::{SheetResult, WorkbookResult};

use super::adapter::WorkbookAdapter;
use super::observability::{
    ExtractionContext, ExtractionEvent, ExtractionObserver, ExtractionSeverity, ExtractionStats,
};
use super::sheet::process_sheet;

/// Number of decoded rows per sheet reported through [`ExtractionEvent::RowDecoded`] by default.
pub const DEFAULT_ROW_PREVIEW_LIMIT: usize = 5;

/// Options controlling workbook processing.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ExtractionOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ExtractionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ExtractionSeverity,
    /// How many decoded rows per sheet are sent to the observer as previews.
    pub row_preview_limit: usize,
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("row_preview_limit", &self.row_preview_limit)
            .finish()
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: ExtractionSeverity::Critical,
            row_preview_limit: DEFAULT_ROW_PREVIEW_LIMIT,
        }
    }
}

/// Process every sheet of `adapter` into a [`WorkbookResult`].
///
/// # Examples
///
/// ```rust
/// use sheet_records::extraction::{process_workbook, MemoryWorkbook};
/// use sheet_records::types::{CellValue, Grid};
///
/// let mut workbook = MemoryWorkbook::new().with_sheet(
///     "People",
///     Grid::from_rows([vec!["id", "name"], vec!["1", "Ada"]]),
/// );
///
/// let result = process_workbook(&mut workbook).unwrap();
/// let people = &result.sheets[0];
/// assert_eq!(people.sheet_name, "People");
/// assert_eq!(people.data[0].get("id"), Some(&CellValue::Number(1.0)));
/// ```
pub fn process_workbook<A>(adapter: &mut A) -> ExtractionResult<WorkbookResult>
where
    A: WorkbookAdapter + ?Sized,
{
    process_workbook_with_options(adapter, &ExtractionOptions::default())
}

/// Like [`process_workbook`], reporting progress and outcome to `options.observer`.
///
/// When an observer is configured, this function reports:
///
/// - `on_event` for each sheet as it is fetched and decoded
/// - `on_success` on success, with sheet and record counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn process_workbook_with_options<A>(
    adapter: &mut A,
    options: &ExtractionOptions,
) -> ExtractionResult<WorkbookResult>
where
    A: WorkbookAdapter + ?Sized,
{
    let ctx = ExtractionContext {
        source: adapter.source_label(),
    };
    let reporter = Reporter {
        observer: options.observer.as_deref(),
        ctx: &ctx,
    };

    let result = aggregate(adapter, &reporter, options.row_preview_limit);
    report_outcome(options, &ctx, &result);
    result
}

fn aggregate<A>(
    adapter: &mut A,
    reporter: &Reporter<'_>,
    preview_limit: usize,
) -> ExtractionResult<WorkbookResult>
where
    A: WorkbookAdapter + ?Sized,
{
    let sheet_names = adapter.list_sheets()?;
    reporter.emit(|| ExtractionEvent::WorkbookOpened {
        sheets: sheet_names.clone(),
    });

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        reporter.emit(|| ExtractionEvent::SheetStarted {
            sheet: name.clone(),
        });

        let grid = adapter
            .get_grid(name)
            .map_err(|e| attach_sheet(name, e))?;
        reporter.emit(|| ExtractionEvent::SheetLoaded {
            sheet: name.clone(),
            rows: grid.row_count(),
        });

        let sheet = process_sheet(name, &grid)?;
        reporter.preview(&sheet, preview_limit);
        reporter.emit(|| ExtractionEvent::SheetFinished {
            sheet: name.clone(),
            records: sheet.record_count(),
        });
        sheets.push(sheet);
    }

    Ok(WorkbookResult::new(sheets))
}

// Adapters may not know which sheet they were asked for; the aggregator always does.
fn attach_sheet(sheet: &str, mut err: FormatError) -> ExtractionError {
    if err.sheet.is_none() {
        err.sheet = Some(sheet.to_string());
    }
    ExtractionError::Format(err)
}

struct Reporter<'a> {
    observer: Option<&'a dyn ExtractionObserver>,
    ctx: &'a ExtractionContext,
}

impl Reporter<'_> {
    fn emit(&self, event: impl FnOnce() -> ExtractionEvent) {
        if let Some(obs) = self.observer {
            obs.on_event(self.ctx, &event());
        }
    }

    fn preview(&self, sheet: &SheetResult, limit: usize) {
        for (idx0, record) in sheet.data.iter().take(limit).enumerate() {
            self.emit(|| ExtractionEvent::RowDecoded {
                sheet: sheet.sheet_name.clone(),
                row: idx0 + 1,
                record: record.clone(),
            });
        }
        if sheet.data.len() > limit {
            self.emit(|| ExtractionEvent::PreviewTruncated {
                sheet: sheet.sheet_name.clone(),
            });
        }
    }
}

pub(crate) fn report_outcome(
    options: &ExtractionOptions,
    ctx: &ExtractionContext,
    result: &ExtractionResult<WorkbookResult>,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };

    match result {
        Ok(wb) => obs.on_success(
            ctx,
            ExtractionStats {
                sheets: wb.sheet_count(),
                records: wb.record_count(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &ExtractionError) -> ExtractionSeverity {
    match e {
        ExtractionError::Format(err) if err.sheet.is_none() => ExtractionSeverity::Critical,
        ExtractionError::Format(_) => ExtractionSeverity::Error,
        ExtractionError::Sheet { .. } => ExtractionSeverity::Error,
    }
}
