use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::IngestError;
use crate::submission::pipeline::IngestOutcome;

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Success envelope: the appended row, where it landed, and when.
pub fn success(outcome: &IngestOutcome) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Data successfully added to sheet",
        "rowData": outcome.row,
        "sheetName": outcome.sheet_name,
        "lastRow": outcome.last_row,
        "timestamp": now_stamp(),
    }))
}

/// Failure envelope. Every error kind lands here; the status line stays 200
/// and callers key off the `success` flag.
pub fn failure(err: &IngestError) -> Json<Value> {
    Json(json!({
        "success": false,
        "error": err.to_string(),
        "message": "Failed to process request",
        "timestamp": now_stamp(),
    }))
}
