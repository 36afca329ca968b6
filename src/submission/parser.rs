use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::error::IngestError;

/// Raw parsed input mapping, before field normalization.
pub type Submission = Map<String, Value>;

/// Parse a request body based on the declared Content-Type. Unknown or
/// missing content types get one JSON attempt before being rejected.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Submission, IngestError> {
    let declared = content_type.unwrap_or("");

    if declared.contains("application/json") {
        parse_json(body)
    } else if declared.contains("application/x-www-form-urlencoded") {
        parse_form(body)
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(IngestError::EmptyOrInvalidData),
            Err(e) => Err(IngestError::UnsupportedContentType {
                content_type: content_type.unwrap_or("(none)").to_string(),
                source: e.to_string(),
            }),
        }
    }
}

fn parse_json(body: &[u8]) -> Result<Submission, IngestError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| IngestError::InvalidPayload(format!("Invalid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(IngestError::EmptyOrInvalidData),
        _ => Err(IngestError::InvalidPayload(
            "JSON body is not an object".to_string(),
        )),
    }
}

/// Split on `&`, then each pair on its first `=`. Pairs without `=` or with
/// an empty decoded key are skipped; repeated keys keep the last value.
/// Percent escapes are decoded in both key and value; `+` is left as-is,
/// and escapes that decode to invalid UTF-8 are rejected.
fn parse_form(body: &[u8]) -> Result<Submission, IngestError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| IngestError::InvalidPayload(format!("Invalid UTF-8: {e}")))?;

    let mut map = Map::new();
    for pair in text.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let key = percent_decode_str(key)
            .decode_utf8()
            .map_err(|e| IngestError::InvalidPayload(format!("Invalid UTF-8: {e}")))?;
        if key.is_empty() {
            continue;
        }
        let value = percent_decode_str(value)
            .decode_utf8()
            .map_err(|e| IngestError::InvalidPayload(format!("Invalid UTF-8: {e}")))?;
        map.insert(key.into_owned(), Value::String(value.into_owned()));
    }

    Ok(map)
}
