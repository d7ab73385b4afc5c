use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExtractionError;
use crate::types::Record;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExtractionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (a sheet or the adapter failed).
    Error,
    /// Critical error (the workbook could not be opened at all).
    Critical,
}

/// Context about an extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionContext {
    /// Adapter-provided source description (file path, `memory`, ...).
    pub source: String,
}

/// Minimal stats reported on successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Number of processed sheets.
    pub sheets: usize,
    /// Number of decoded records across all sheets.
    pub records: usize,
}

/// Progress events emitted while a workbook is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    WorkbookOpened { sheets: Vec<String> },
    SheetStarted { sheet: String },
    SheetLoaded { sheet: String, rows: usize },
    /// One of the first few decoded rows. `row` is 1-based and counts data rows only.
    RowDecoded { sheet: String, row: usize, record: Record },
    /// More rows were decoded than the preview limit allows.
    PreviewTruncated { sheet: String },
    SheetFinished { sheet: String, records: usize },
}

/// Observer interface for extraction progress and outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ExtractionObserver: Send + Sync {
    /// Called for every progress event.
    fn on_event(&self, _ctx: &ExtractionContext, _event: &ExtractionEvent) {}

    /// Called when the whole workbook was processed.
    fn on_success(&self, _ctx: &ExtractionContext, _stats: ExtractionStats) {}

    /// Called when extraction fails.
    fn on_failure(&self, _ctx: &ExtractionContext, _severity: ExtractionSeverity, _error: &ExtractionError) {}

    /// Called when an extraction failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ExtractionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ExtractionObserver>>) -> Self {
        Self { observers }
    }

    /// Add another observer to the end of the fan-out list.
    pub fn push(&mut self, observer: Arc<dyn ExtractionObserver>) {
        self.observers.push(observer);
    }

    fn each(&self, f: impl Fn(&dyn ExtractionObserver)) {
        self.observers.iter().for_each(|o| f(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ExtractionObserver for CompositeObserver {
    fn on_event(&self, ctx: &ExtractionContext, event: &ExtractionEvent) {
        self.each(|o| o.on_event(ctx, event));
    }

    fn on_success(&self, ctx: &ExtractionContext, stats: ExtractionStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// A single observer callback rendered as one log line.
///
/// Shared by the text observers so stderr and file output read the same.
enum LogEntry<'a> {
    Event(&'a ExtractionEvent),
    Success(ExtractionStats),
    Failure {
        severity: ExtractionSeverity,
        error: &'a ExtractionError,
        alert: bool,
    },
}

impl LogEntry<'_> {
    fn render(&self, ctx: &ExtractionContext) -> String {
        let source = &ctx.source;
        match self {
            Self::Event(event) => format!("event source={source} {}", describe_event(event)),
            Self::Success(stats) => format!(
                "ok source={source} sheets={} records={}",
                stats.sheets, stats.records
            ),
            Self::Failure { severity, error, alert } => {
                let tag = if *alert { "ALERT" } else { "fail" };
                format!("{tag} severity={severity:?} source={source} err={error}")
            }
        }
    }
}

/// Logs extraction events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn log(&self, ctx: &ExtractionContext, entry: LogEntry<'_>) {
        eprintln!("[extract] {}", entry.render(ctx));
    }
}

impl ExtractionObserver for StdErrObserver {
    fn on_event(&self, ctx: &ExtractionContext, event: &ExtractionEvent) {
        self.log(ctx, LogEntry::Event(event));
    }

    fn on_success(&self, ctx: &ExtractionContext, stats: ExtractionStats) {
        self.log(ctx, LogEntry::Success(stats));
    }

    fn on_failure(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.log(ctx, LogEntry::Failure { severity, error, alert: false });
    }

    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.log(ctx, LogEntry::Failure { severity, error, alert: true });
    }
}

/// Appends timestamped extraction lines (progress, outcome, and alerts) to a log file.
///
/// The file is opened on the first write and kept open afterwards. Logging never fails an
/// extraction: open or write errors drop the line.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, ctx: &ExtractionContext, entry: LogEntry<'_>) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = OpenOptions::new().create(true).append(true).open(&self.path).ok();
        }
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{} {}", unix_ts(), entry.render(ctx));
        }
    }
}

impl ExtractionObserver for FileObserver {
    fn on_event(&self, ctx: &ExtractionContext, event: &ExtractionEvent) {
        self.log(ctx, LogEntry::Event(event));
    }

    fn on_success(&self, ctx: &ExtractionContext, stats: ExtractionStats) {
        self.log(ctx, LogEntry::Success(stats));
    }

    fn on_failure(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.log(ctx, LogEntry::Failure { severity, error, alert: false });
    }

    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.log(ctx, LogEntry::Failure { severity, error, alert: true });
    }
}

fn describe_event(event: &ExtractionEvent) -> String {
    match event {
        ExtractionEvent::WorkbookOpened { sheets } => format!("found {} sheets", sheets.len()),
        ExtractionEvent::SheetStarted { sheet } => format!("processing sheet '{sheet}'"),
        ExtractionEvent::SheetLoaded { sheet, rows } => format!("sheet '{sheet}' has {rows} rows"),
        ExtractionEvent::RowDecoded { sheet, row, record } => format!(
            "sheet '{sheet}' row {row}: {}",
            serde_json::to_string(record).unwrap_or_default()
        ),
        ExtractionEvent::PreviewTruncated { sheet } => format!("sheet '{sheet}' ..."),
        ExtractionEvent::SheetFinished { sheet, records } => {
            format!("finished sheet '{sheet}' records={records}")
        }
    }
}

// Seconds since the epoch; a clock before 1970 logs as 0.
fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
