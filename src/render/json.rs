//! JSON rendering for report documents

use super::Document;
use serde_json::Value;

/// The recorded blocks as a `serde_json` tree, for callers that embed the
/// report in a larger JSON payload.
pub fn render_json(document: &Document) -> serde_json::Result<Value> {
    serde_json::to_value(document)
}

/// Indented JSON, what the binary prints for `--format json`.
pub fn render_json_string(document: &Document) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Single line JSON.
pub fn render_json_compact(document: &Document) -> serde_json::Result<String> {
    serde_json::to_string(document)
}
