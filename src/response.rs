//! JSON response bodies for a transport layer.
//!
//! A successful extraction is rendered as
//!
//! ```json
//! { "message": "File processed successfully",
//!   "data": [ { "sheetName": "Sheet1", "headers": ["id"], "data": [ { "id": 1.0 } ] } ] }
//! ```
//!
//! and a failure as `{ "error": "..." }`.

use serde::Serialize;

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::WorkbookResult;

/// Status message attached to successful responses.
pub const SUCCESS_MESSAGE: &str = "File processed successfully";

/// Body returned when every sheet was processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResponse {
    /// Status message.
    pub message: String,
    /// Per-sheet results in workbook order.
    pub data: WorkbookResult,
}

impl ExtractionResponse {
    /// Wrap a workbook result with the standard success message.
    pub fn new(data: WorkbookResult) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Body returned when extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// User-facing description of the failure.
    pub error: String,
}

impl ErrorResponse {
    /// Render an extraction error for end users.
    ///
    /// Failures tied to a sheet name that sheet; failures before any sheet was read are reported
    /// as the workbook failing to open.
    pub fn from_error(err: &ExtractionError) -> Self {
        let error = match err {
            ExtractionError::Format(e) => match e.sheet.as_deref() {
                Some(sheet) => format!("Error processing sheet {sheet}: {}", e.message),
                None => format!("Failed to open Excel file: {}", e.message),
            },
            ExtractionError::Sheet { sheet, reason } => {
                format!("Error processing sheet {sheet}: {reason}")
            }
        };
        Self { error }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&ExtractionError> for ErrorResponse {
    fn from(err: &ExtractionError) -> Self {
        Self::from_error(err)
    }
}

/// Map an extraction outcome to the matching response body.
pub fn respond(result: ExtractionResult<WorkbookResult>) -> Result<ExtractionResponse, ErrorResponse> {
    result
        .map(ExtractionResponse::new)
        .map_err(|e| ErrorResponse::from_error(&e))
}
