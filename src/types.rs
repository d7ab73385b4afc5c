//! Core data model types for extraction.
//!
//! A workbook adapter supplies one [`Grid`] of cell text per sheet. Extraction turns each grid
//! into a [`SheetResult`] of header-keyed [`Record`]s whose values are typed [`CellValue`]s, and
//! collects the sheets into a [`WorkbookResult`].

use indexmap::IndexMap;
use serde::ser::Serializer;
use serde::Serialize;

/// A single typed cell value.
///
/// Cell text is either numeric or it is not; there is no null, bool, or date kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 64-bit float.
    Number(f64),
    /// Original cell text, unchanged.
    Text(String),
}

impl CellValue {
    /// Returns the number, if this is [`CellValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is [`CellValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s.as_str()),
        }
    }
}

// JSON has no NaN/inf, so non-finite numbers are written as their textual form.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Self::Number(n) => serializer.serialize_str(&n.to_string()),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One ordered row of raw cell text.
pub type Row = Vec<String>;

/// Raw 2-D cell text for one sheet, as produced by a workbook adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cell text.
    pub rows: Vec<Row>,
}

impl Grid {
    /// Create a grid from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a grid from anything that yields rows of string-like cells.
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of rows, including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl From<Vec<Row>> for Grid {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// A data row decoded into header-keyed values.
///
/// Keys iterate in header order. A key appears at most once; writing an existing key replaces its
/// value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, CellValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert or replace `key`, returning the previous value if the key already existed.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) -> Option<CellValue> {
        self.fields.insert(key.into(), value)
    }

    /// Look up a value by field name.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate `(field, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Extraction output for one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResult {
    /// Sheet name as reported by the adapter.
    pub sheet_name: String,
    /// Header row, verbatim (duplicates and blanks included).
    pub headers: Vec<String>,
    /// One record per data row, in row order.
    pub data: Vec<Record>,
}

impl SheetResult {
    /// Number of decoded records.
    pub fn record_count(&self) -> usize {
        self.data.len()
    }
}

/// Extraction output for a whole workbook: one [`SheetResult`] per sheet, in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkbookResult {
    /// Per-sheet results in workbook order.
    pub sheets: Vec<SheetResult>,
}

impl WorkbookResult {
    /// Create a workbook result from per-sheet results.
    pub fn new(sheets: Vec<SheetResult>) -> Self {
        Self { sheets }
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Total records across all sheets.
    pub fn record_count(&self) -> usize {
        self.sheets.iter().map(SheetResult::record_count).sum()
    }

    /// Iterate sheet names in workbook order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.sheet_name.as_str())
    }

    /// Find a sheet result by name.
    pub fn sheet(&self, name: &str) -> Option<&SheetResult> {
        self.sheets.iter().find(|s| s.sheet_name == name)
    }
}

impl IntoIterator for WorkbookResult {
    type Item = SheetResult;
    type IntoIter = std::vec::IntoIter<SheetResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.into_iter()
    }
}
