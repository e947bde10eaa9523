//! Record-to-event normalization.
//!
//! Maps one raw [`EventRecord`] to a [`NormalizedEvent`], or to nothing
//! when the record cannot become a calendar entry (no start time).

use chrono::{Duration, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::error::ExportResult;
use crate::event::{EventRecord, EventTime, NormalizedEvent};
use crate::time::resolve;

/// Fallback summary for records with neither `title` nor `name`.
const UNTITLED: &str = "Untitled";

/// Category applied when the record has no `type` field.
const DEFAULT_CATEGORY: &str = "event";

/// Normalize one record against the target timezone.
///
/// Returns `Ok(None)` when the record has no start time; such records are
/// dropped silently and surface only in the final count. Date resolution
/// failures abort the run.
pub fn normalize(record: &EventRecord, tz: Tz) -> ExportResult<Option<NormalizedEvent>> {
    let Some(ref start_input) = record.start else {
        return Ok(None);
    };

    let start = resolve(start_input, tz)?;
    let end = match record.end {
        Some(ref input) => resolve(input, tz)?,
        None => start + Duration::hours(1),
    };

    let (start, end) = if record.all_day {
        // Date granularity only; the stored end date is trusted to already
        // be the exclusive boundary.
        (
            EventTime::Date(start.date_naive()),
            EventTime::Date(end.date_naive()),
        )
    } else {
        (EventTime::Zoned(start), EventTime::Zoned(end))
    };

    let summary = record
        .title
        .as_deref()
        .or(record.name.as_deref())
        .unwrap_or(UNTITLED)
        .to_string();

    let category = record
        .kind
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Ok(Some(NormalizedEvent {
        uid: format!("{}@firestore", Uuid::new_v4()),
        summary,
        start,
        end,
        description: record.description.clone(),
        location: record.location.clone(),
        url: record.url.clone(),
        produced_at: Utc::now().with_timezone(&tz),
        categories: vec![category],
    }))
}
