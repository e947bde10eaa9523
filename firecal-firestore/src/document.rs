//! Decoding Firestore documents into event records.
//!
//! Firestore's REST format wraps every field value in a type tag
//! (`stringValue`, `timestampValue`, ...). This module unwraps those tags
//! into the store-neutral [`EventRecord`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use firecal_core::error::{ExportError, ExportResult};
use firecal_core::event::{DateInput, EventRecord};

/// Decode one document's fields into an [`EventRecord`].
pub fn record_from_fields(fields: &Map<String, Value>) -> ExportResult<EventRecord> {
    Ok(EventRecord {
        title: string_field(fields, "title"),
        name: string_field(fields, "name"),
        start: date_field(fields, "start")?,
        end: date_field(fields, "end")?,
        all_day: bool_field(fields, "all_day").unwrap_or(false),
        description: string_field(fields, "description"),
        location: string_field(fields, "location"),
        url: string_field(fields, "url"),
        kind: string_field(fields, "type"),
    })
}

/// Read a string field; empty strings count as absent.
fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    let s = fields.get(name)?.get("stringValue")?.as_str()?;
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn bool_field(fields: &Map<String, Value>, name: &str) -> Option<bool> {
    fields.get(name)?.get("booleanValue")?.as_bool()
}

/// Read a date-bearing field into the matching [`DateInput`] shape.
fn date_field(fields: &Map<String, Value>, name: &str) -> ExportResult<Option<DateInput>> {
    let Some(value) = fields.get(name) else {
        return Ok(None);
    };
    let Some(wrapper) = value.as_object() else {
        return Err(unsupported(name, value));
    };

    if let Some(ts) = wrapper.get("timestampValue").and_then(Value::as_str) {
        let instant = DateTime::parse_from_rfc3339(ts).map_err(|e| {
            ExportError::UnsupportedType(format!(
                "field '{name}': bad timestampValue {ts:?}: {e}"
            ))
        })?;
        return Ok(Some(DateInput::Native(instant.with_timezone(&Utc))));
    }
    if let Some(n) = wrapper.get("integerValue").and_then(Value::as_str) {
        let secs: i64 = n.parse().map_err(|_| {
            ExportError::UnsupportedType(format!("field '{name}': bad integerValue {n:?}"))
        })?;
        return Ok(Some(DateInput::Epoch(secs as f64)));
    }
    if let Some(n) = wrapper.get("doubleValue").and_then(Value::as_f64) {
        return Ok(Some(DateInput::Epoch(n)));
    }
    if let Some(s) = wrapper.get("stringValue").and_then(Value::as_str) {
        return Ok(Some(DateInput::Text(s.to_string())));
    }
    if wrapper.contains_key("nullValue") {
        return Ok(None);
    }

    Err(unsupported(name, value))
}

fn unsupported(name: &str, value: &Value) -> ExportError {
    let kind = value
        .as_object()
        .and_then(|m| m.keys().next().cloned())
        .unwrap_or_else(|| "non-object".to_string());
    ExportError::UnsupportedType(format!("field '{name}' has unsupported value type {kind}"))
}
