//! Cell text → [`CellValue`] classification.

use crate::types::CellValue;

/// Classify one cell's text as a number or text.
///
/// The whole string must parse as an `f64` (decimal or scientific notation, optional sign) to
/// become [`CellValue::Number`]. Anything else, including partial matches like `"12abc"`, padded
/// input like `" 7"`, and the empty string, is kept verbatim as [`CellValue::Text`].
///
/// Finite-looking literals that overflow `f64` (e.g. `"1e400"`) stay text; explicit `inf` /
/// `infinity` / `nan` literals become numbers.
pub fn coerce_cell(text: &str) -> CellValue {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() || is_non_finite_literal(text) => CellValue::Number(n),
        _ => CellValue::Text(text.to_owned()),
    }
}

fn is_non_finite_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    matches!(
        unsigned.to_ascii_lowercase().as_str(),
        "inf" | "infinity" | "nan"
    )
}
