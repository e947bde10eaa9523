//! Store-neutral event types.
//!
//! These types represent event documents in a store-agnostic way. The
//! Firestore collaborator decodes its wire format into [`EventRecord`],
//! and the rest of the pipeline works exclusively with these types.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// A raw event document, as read from the external store.
///
/// Read-only input: fields are extracted once and never written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    pub title: Option<String>,
    pub name: Option<String>,
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
    /// Whether the event covers whole calendar days (date granularity only).
    pub all_day: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    /// The document's `type` field, used as the calendar category.
    pub kind: Option<String>,
}

/// A timestamp as stored in the source document.
///
/// Documents mix several representations for the same field; each variant
/// resolves to a zoned instant via [`crate::time::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// A native store timestamp, already an absolute instant.
    Native(DateTime<Utc>),
    /// Seconds since the Unix epoch (fractional seconds allowed).
    Epoch(f64),
    /// An ISO-8601 string, with or without an offset.
    Text(String),
}

/// An event boundary, either date-only (all-day) or a zoned instant.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    Date(NaiveDate),
    Zoned(DateTime<Tz>),
}

/// A fully normalized calendar entry, ready for serialization.
#[derive(Debug, Clone)]
pub struct NormalizedEvent {
    /// Unique identifier scoped to this export.
    pub uid: String,
    pub summary: String,
    pub start: EventTime,
    /// Never absent: defaults to one hour after `start` when the source
    /// document has no end.
    pub end: EventTime,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    /// When this entry was produced, in the target timezone (DTSTAMP).
    pub produced_at: DateTime<Tz>,
    /// Single-element category tag: the record's `kind`, or "event".
    pub categories: Vec<String>,
}
