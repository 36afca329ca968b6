use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::config::FieldSet;

use super::parser::Submission;

/// Column order for the full field set. The `without-notes` layout drops
/// the Notes column and nothing else.
pub const HEADERS_WITH_NOTES: [&str; 13] = [
    "License Plate",
    "Store",
    "Time",
    "Lead Type",
    "Rep Email",
    "First Name",
    "Last Name",
    "Email",
    "Phone Number",
    "Zip Code",
    "Image URL",
    "Notes",
    "Timestamp",
];

pub fn header_row(field_set: FieldSet) -> Vec<String> {
    HEADERS_WITH_NOTES
        .iter()
        .filter(|h| field_set == FieldSet::WithNotes || **h != "Notes")
        .map(|h| h.to_string())
        .collect()
}

/// Build the fixed-order row for one submission. Pure: the clock is injected
/// so the timestamp choice stays visible at the call site.
pub fn map_record(data: &Submission, field_set: FieldSet, now: DateTime<Utc>) -> Vec<String> {
    let mut row = vec![
        lookup(data, &["licensePlate", "license_plate"]),
        lookup(data, &["store"]),
        lookup(data, &["time"]),
        lookup(data, &["leadType", "lead_type"]),
        lookup(data, &["repEmail", "rep_email"]),
        lookup(data, &["firstName", "first_name"]),
        lookup(data, &["lastName", "last_name"]),
        lookup(data, &["email"]),
        lookup(data, &["phoneNumber", "phone_number"]),
        lookup(data, &["zipCode", "zip_code"]),
        lookup(data, &["imageUrl", "image_url", "image"]),
    ];

    if field_set == FieldSet::WithNotes {
        row.push(lookup(data, &["notes"]));
    }

    let timestamp = match lookup(data, &["timestamp"]) {
        t if t.is_empty() => now.to_rfc3339_opts(SecondsFormat::Millis, true),
        t => t,
    };
    row.push(timestamp);

    row
}

/// First present, non-null value along the alias chain, rendered to text.
/// Presence is key-existence: an explicit empty string stops the chain.
fn lookup(data: &Submission, keys: &[&str]) -> String {
    for key in keys {
        match data.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => return s.clone(),
            Some(other) => return other.to_string(),
        }
    }
    String::new()
}
