//! Classification of streaming query-result frames
//!
//! Each inbound frame is one decoded JSON object and is classified
//! independently: a `header` field makes it a schema frame, a `row` field a
//! data frame, anything else is malformed. Accumulating rows that belong to
//! the same logical table across frames is the caller's concern; no state is
//! kept here.

use serde_json::Value;
use tracing::debug;

use crate::error::ResponseError;
use crate::query::ResultTable;

const ERROR_HEADER: &str = "Execution error";
const ERROR_COLUMN: &str = "message";

/// Classify one protocol frame and normalize it into a [`ResultTable`].
///
/// A header frame without a nested `schema` string and a row frame without a
/// `columns` array both fail with [`ResponseError::MissingField`]; invalid
/// protocol input must never surface as a crash.
pub fn parse_select_response(frame: &Value) -> Result<ResultTable, ResponseError> {
    if let Some(header) = frame.get("header") {
        let schema = header
            .get("schema")
            .and_then(Value::as_str)
            .ok_or(ResponseError::MissingField {
                frame: "header",
                field: "schema",
            })?;
        return Ok(ResultTable::schema(parse_select_headers(schema)));
    }

    if let Some(row) = frame.get("row") {
        let columns = row
            .get("columns")
            .and_then(Value::as_array)
            .ok_or(ResponseError::MissingField {
                frame: "row",
                field: "columns",
            })?;
        return Ok(ResultTable::row(columns.clone()));
    }

    debug!(%frame, "frame is neither a header nor a row");
    Err(ResponseError::UnrecognizedFrame)
}

/// Split a schema string into top-level column declarations.
///
/// Declarations are comma-separated, but commas inside backtick-quoted
/// identifiers and commas nested inside angle-bracket generics do not
/// separate. Single left-to-right scan, no backtracking.
pub fn parse_select_headers(schema: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_backticks = false;

    for ch in schema.chars() {
        match ch {
            '`' => {
                in_backticks = !in_backticks;
                current.push(ch);
            }
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 && !in_backticks => {
                columns.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    let trailing = current.trim();
    if !trailing.is_empty() {
        columns.push(trailing.to_owned());
    }
    columns
}

/// Wrap a literal error message in the uniform table shape.
pub fn error_table_with_text(text: &str) -> ResultTable {
    ResultTable {
        header: Some(ERROR_HEADER.to_owned()),
        column_names: Some(vec![ERROR_COLUMN.to_owned()]),
        values: Some(vec![vec![Value::String(text.to_owned())]]),
        error: true,
    }
}

/// Convert a transport-level failure into the uniform table shape.
///
/// Prefers the `errorMessage` detail from the response body, then the whole
/// body, then the raw status line. The failure is converted, not propagated,
/// so downstream rendering sees one success/error shape.
pub fn parse_error_response(status: u16, status_text: &str, body: Option<&Value>) -> ResultTable {
    if let Some(body) = body {
        if let Some(message) = body.get("errorMessage").and_then(Value::as_str) {
            return error_table_with_text(message);
        }
        return error_table_with_text(&body.to_string());
    }
    error_table_with_text(&format!("{status} {status_text}"))
}
