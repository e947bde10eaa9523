//! ICS file generation.

use std::fs;
use std::path::Path;

use chrono::Utc;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::ExportResult;
use crate::event::{EventTime, NormalizedEvent};

/// PRODID emitted in the calendar header.
const PRODID: &str = "-//Firestore Export//Events to ICS//EN";

/// Add a datetime property with proper formatting based on EventTime variant
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::Zoned(dt) => {
            // Local wall time with a TZID parameter
            let mut prop = Property::new(name, dt.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", dt.timezone().name());
            ics_event.append_property(prop);
        }
    }
}

/// Accumulator for the output calendar.
///
/// Created once per run, populated by appending, serialized exactly once.
pub struct ExportCalendar {
    calendar: Calendar,
    count: usize,
}

impl ExportCalendar {
    pub fn new() -> Self {
        let mut calendar = Calendar::new();
        calendar.append_property(Property::new("PRODID", PRODID));
        Self { calendar, count: 0 }
    }

    /// Number of events added so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Append one event as a VEVENT.
    pub fn push(&mut self, event: &NormalizedEvent) {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.summary(&event.summary);

        // Set start/end times
        add_datetime_property(&mut ics_event, "DTSTART", &event.start);
        add_datetime_property(&mut ics_event, "DTEND", &event.end);

        // Optional fields
        if let Some(ref desc) = event.description {
            ics_event.description(desc);
        }

        if let Some(ref loc) = event.location {
            ics_event.location(loc);
        }

        if let Some(ref url) = event.url {
            ics_event.add_property("URL", url);
        }

        // DTSTAMP - required by RFC 5545
        let dtstamp = event
            .produced_at
            .with_timezone(&Utc)
            .format("%Y%m%dT%H%M%SZ")
            .to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        ics_event.add_property("CATEGORIES", event.categories.join(","));

        self.calendar.push(ics_event.done());
        self.count += 1;
    }

    /// Render the calendar to its interchange text form.
    pub fn to_ics(&self) -> String {
        self.calendar.to_string()
    }

    /// Write the calendar to disk in a single pass and return the number
    /// of events it contains.
    pub fn write_to(self, path: &Path) -> ExportResult<usize> {
        fs::write(path, self.to_ics())?;
        Ok(self.count)
    }
}

impl Default for ExportCalendar {
    fn default() -> Self {
        Self::new()
    }
}
