//! Core types for the firecal workspace.
//!
//! This crate provides the store-neutral pieces of the export pipeline:
//! - `event` — raw event records and normalized calendar entries
//! - `time` — resolution of mixed timestamp inputs into zoned instants
//! - `normalize` — record-to-event mapping
//! - `ics` — calendar accumulation and .ics generation

pub mod error;
pub mod event;
pub mod ics;
pub mod normalize;
pub mod time;

// Re-export all event types at crate root for convenience
pub use error::{ExportError, ExportResult};
pub use event::*;
