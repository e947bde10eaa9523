//! ICS generation.
//!
//! This module accumulates normalized events into a single VCALENDAR and
//! writes it out according to RFC 5545.

mod generate;

pub use generate::ExportCalendar;
