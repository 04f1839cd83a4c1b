// Copyright 2026 Streamlens Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Uniform tabular shape for streaming query-result frames
//!
//! The query-execution protocol interleaves schema headers, data rows and
//! error payloads in one response stream. Every frame is normalized into a
//! [`ResultTable`] so the presentation layer has a single shape to render.

use serde::{Deserialize, Serialize};

pub mod response;

pub use response::{
    error_table_with_text, parse_error_response, parse_select_headers, parse_select_response,
};

/// One normalized table per protocol frame.
///
/// Exactly one of `column_names` and `values` is populated, except for error
/// tables which carry both a synthetic `message` column and one row holding
/// the error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Table label. `Some("Schema")` for schema tables, `Some("Execution
    /// error")` for error tables, `None` for row tables.
    pub header: Option<String>,
    /// Raw column declarations, captured verbatim from the header grammar.
    pub column_names: Option<Vec<String>>,
    /// Row value lists.
    pub values: Option<Vec<Vec<serde_json::Value>>>,
    /// Whether this table represents a failed execution.
    #[serde(default)]
    pub error: bool,
}

impl ResultTable {
    /// Schema table: column declarations, no rows.
    pub(crate) fn schema(column_names: Vec<String>) -> Self {
        Self {
            header: Some("Schema".to_owned()),
            column_names: Some(column_names),
            values: None,
            error: false,
        }
    }

    /// Row table: one row of values, no header, no columns.
    pub(crate) fn row(values: Vec<serde_json::Value>) -> Self {
        Self {
            header: None,
            column_names: None,
            values: Some(vec![values]),
            error: false,
        }
    }
}
