use std::sync::{Arc, Mutex};

use sheet_records::extraction::{
    process_workbook_with_options, CompositeObserver, ExtractionContext, ExtractionEvent,
    ExtractionObserver, ExtractionOptions, ExtractionSeverity, ExtractionStats, FileObserver,
    MemoryWorkbook, WorkbookAdapter,
};
use sheet_records::types::Grid;
use sheet_records::{ExtractionError, FormatError};

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<ExtractionEvent>>,
    successes: Mutex<Vec<ExtractionStats>>,
    failures: Mutex<Vec<ExtractionSeverity>>,
    alerts: Mutex<Vec<ExtractionSeverity>>,
    sources: Mutex<Vec<String>>,
}

impl ExtractionObserver for RecordingObserver {
    fn on_event(&self, ctx: &ExtractionContext, event: &ExtractionEvent) {
        self.sources.lock().unwrap().push(ctx.source.clone());
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_success(&self, _ctx: &ExtractionContext, stats: ExtractionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &ExtractionContext, severity: ExtractionSeverity, _error: &ExtractionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &ExtractionContext, severity: ExtractionSeverity, _error: &ExtractionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

struct UnopenableWorkbook;

impl WorkbookAdapter for UnopenableWorkbook {
    fn list_sheets(&mut self) -> Result<Vec<String>, FormatError> {
        Err(FormatError::workbook("not a zip file"))
    }

    fn get_grid(&mut self, sheet: &str) -> Result<Grid, FormatError> {
        Err(FormatError::sheet(sheet, "unreachable"))
    }
}

fn numbered_grid(data_rows: usize) -> Grid {
    let mut rows = vec![vec!["n".to_string()]];
    rows.extend((1..=data_rows).map(|i| vec![i.to_string()]));
    Grid::new(rows)
}

fn options_with(obs: &Arc<RecordingObserver>) -> ExtractionOptions {
    ExtractionOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    }
}

#[test]
fn observer_receives_progress_events_and_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let mut wb = MemoryWorkbook::new()
        .with_label("upload.xlsx")
        .with_sheet("One", numbered_grid(2));

    process_workbook_with_options(&mut wb, &options_with(&obs)).unwrap();

    let events = obs.events.lock().unwrap().clone();
    assert_eq!(events.len(), 6);
    assert_eq!(
        events[0],
        ExtractionEvent::WorkbookOpened {
            sheets: vec!["One".to_string()]
        }
    );
    assert_eq!(
        events[2],
        ExtractionEvent::SheetLoaded {
            sheet: "One".to_string(),
            rows: 3
        }
    );
    assert!(matches!(&events[3], ExtractionEvent::RowDecoded { row: 1, .. }));
    assert!(matches!(&events[4], ExtractionEvent::RowDecoded { row: 2, .. }));
    assert_eq!(
        events[5],
        ExtractionEvent::SheetFinished {
            sheet: "One".to_string(),
            records: 2
        }
    );

    assert!(obs.sources.lock().unwrap().iter().all(|s| s == "upload.xlsx"));
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![ExtractionStats { sheets: 1, records: 2 }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn row_previews_are_capped_and_marked_truncated() {
    let obs = Arc::new(RecordingObserver::default());
    let mut wb = MemoryWorkbook::new().with_sheet("Big", numbered_grid(10));
    let opts = ExtractionOptions {
        row_preview_limit: 3,
        ..options_with(&obs)
    };

    process_workbook_with_options(&mut wb, &opts).unwrap();

    let events = obs.events.lock().unwrap().clone();
    let previews = events
        .iter()
        .filter(|e| matches!(e, ExtractionEvent::RowDecoded { .. }))
        .count();
    assert_eq!(previews, 3);
    assert!(events.contains(&ExtractionEvent::PreviewTruncated {
        sheet: "Big".to_string()
    }));
}

#[test]
fn observer_receives_failure_without_alert_for_sheet_error() {
    let obs = Arc::new(RecordingObserver::default());
    let mut wb = MemoryWorkbook::new().with_sheet("Empty", Grid::default());

    let _ = process_workbook_with_options(&mut wb, &options_with(&obs)).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![ExtractionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_when_workbook_cannot_be_opened() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = process_workbook_with_options(&mut UnopenableWorkbook, &options_with(&obs)).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![ExtractionSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![ExtractionSeverity::Critical]);
    assert!(obs.events.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_sheet_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let mut wb = MemoryWorkbook::new().with_sheet("Empty", Grid::default());
    let opts = ExtractionOptions {
        alert_at_or_above: ExtractionSeverity::Warning,
        ..options_with(&obs)
    };

    let _ = process_workbook_with_options(&mut wb, &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![ExtractionSeverity::Error]);
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![a.clone() as Arc<dyn ExtractionObserver>, b.clone()]);
    let opts = ExtractionOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let mut wb = MemoryWorkbook::new().with_sheet("One", numbered_grid(1));
    process_workbook_with_options(&mut wb, &opts).unwrap();

    assert_eq!(a.successes.lock().unwrap().len(), 1);
    assert_eq!(b.successes.lock().unwrap().len(), 1);
    assert_eq!(a.events.lock().unwrap().len(), b.events.lock().unwrap().len());
}

#[test]
fn file_observer_appends_progress_and_outcome_lines() {
    let path = std::env::temp_dir().join(format!(
        "sheet-records-observer-{}.log",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let observer = Arc::new(FileObserver::new(&path));
    assert_eq!(observer.path(), path.as_path());
    let opts = ExtractionOptions {
        observer: Some(observer),
        ..Default::default()
    };

    let mut ok = MemoryWorkbook::new().with_sheet("One", numbered_grid(1));
    process_workbook_with_options(&mut ok, &opts).unwrap();
    let _ = process_workbook_with_options(&mut UnopenableWorkbook, &opts).unwrap_err();

    let log = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].contains("event source=memory found 1 sheets"));
    assert!(lines[1].contains("processing sheet 'One'"));
    assert!(lines[2].contains("sheet 'One' has 2 rows"));
    assert!(lines[3].contains(r#"sheet 'One' row 1: {"n":1.0}"#));
    assert!(lines[4].contains("finished sheet 'One' records=1"));
    assert!(lines[5].contains("ok source=memory sheets=1 records=1"));
    assert!(lines[6].contains("fail severity=Critical"));
    assert!(lines[7].contains("ALERT severity=Critical"));

    let _ = std::fs::remove_file(&path);
}
