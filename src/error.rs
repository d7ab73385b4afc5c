use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// A workbook adapter could not produce sheet names or a sheet's grid.
///
/// `sheet` is `None` when the failure happened before any sheet was addressed (e.g. the file
/// could not be opened or its sheet list could not be read).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    /// Sheet the failure refers to, if any.
    pub sheet: Option<String>,
    /// Adapter-provided description, surfaced verbatim.
    pub message: String,
}

impl FormatError {
    /// A failure that is not tied to a particular sheet.
    pub fn workbook(message: impl Into<String>) -> Self {
        Self {
            sheet: None,
            message: message.into(),
        }
    }

    /// A failure while reading the named sheet.
    pub fn sheet(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sheet: Some(sheet.into()),
            message: message.into(),
        }
    }
}

/// Error type returned by workbook processing.
///
/// Both variants are terminal: aggregation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The workbook adapter failed.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// A sheet's grid does not have the required shape.
    #[error("sheet '{sheet}': {reason}")]
    Sheet { sheet: String, reason: String },
}

impl ExtractionError {
    pub(crate) fn sheet(sheet: &str, reason: impl Into<String>) -> Self {
        Self::Sheet {
            sheet: sheet.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the sheet this error refers to, if any.
    pub fn sheet_name(&self) -> Option<&str> {
        match self {
            Self::Format(e) => e.sheet.as_deref(),
            Self::Sheet { sheet, .. } => Some(sheet.as_str()),
        }
    }
}
