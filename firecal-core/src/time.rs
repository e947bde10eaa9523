//! Resolution of mixed timestamp inputs into zoned instants.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ExportError, ExportResult};
use crate::event::DateInput;

/// Naive formats accepted for text timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Resolve a [`DateInput`] into an instant in the target timezone.
///
/// Values that already carry an offset (native timestamps, epoch seconds,
/// RFC 3339 strings with a zone) are converted. A naive string is assumed
/// to represent local time in the target zone and gets the zone assigned,
/// never interpreted as UTC.
pub fn resolve(value: &DateInput, tz: Tz) -> ExportResult<DateTime<Tz>> {
    match value {
        DateInput::Native(dt) => Ok(dt.with_timezone(&tz)),
        DateInput::Epoch(secs) => from_epoch(*secs, tz),
        DateInput::Text(s) => from_text(s, tz),
    }
}

fn from_epoch(secs: f64, tz: Tz) -> ExportResult<DateTime<Tz>> {
    if !secs.is_finite() {
        return Err(ExportError::UnsupportedType(format!(
            "epoch value {secs} is not a finite number"
        )));
    }

    let whole = secs.trunc() as i64;
    let nanos = ((secs.fract().abs() * 1e9).round() as u32).min(999_999_999);
    match Utc.timestamp_opt(whole, nanos) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&tz)),
        _ => Err(ExportError::UnsupportedType(format!(
            "epoch value {secs} is out of range"
        ))),
    }
}

fn from_text(s: &str, tz: Tz) -> ExportResult<DateTime<Tz>> {
    let trimmed = s.trim();

    // Offset-carrying strings are absolute instants; convert them.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&tz));
    }

    // Naive strings represent local time in the target zone.
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return assign_zone(naive, tz, s);
        }
    }

    // Bare dates resolve to local midnight.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return assign_zone(naive, tz, s);
        }
    }

    Err(ExportError::UnsupportedType(format!(
        "unparseable date string: {s:?}"
    )))
}

/// Assign the target zone to a naive local time.
///
/// DST folds resolve to the earlier instant; times inside a spring-forward
/// gap do not exist and fail the run.
fn assign_zone(naive: NaiveDateTime, tz: Tz, source: &str) -> ExportResult<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => Err(ExportError::UnsupportedType(format!(
            "local time {source:?} does not exist in {tz}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Timelike};
    use chrono_tz::Europe::Brussels;

    #[test]
    fn native_timestamps_are_converted() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let resolved = resolve(&DateInput::Native(utc), Brussels).unwrap();

        // Same instant, Brussels wall clock (UTC+1 in January)
        assert_eq!(resolved, utc);
        assert_eq!(resolved.hour(), 9);
    }

    #[test]
    fn epoch_seconds_resolve_to_instants() {
        // 2024-01-10T10:00:00Z
        let resolved = resolve(&DateInput::Epoch(1_704_880_800.0), Brussels).unwrap();
        assert_eq!(
            resolved.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn fractional_epoch_seconds_are_preserved() {
        let resolved = resolve(&DateInput::Epoch(1_704_880_800.5), Brussels).unwrap();
        assert_eq!(resolved.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn offset_strings_are_converted() {
        let resolved =
            resolve(&DateInput::Text("2024-01-10T09:00:00Z".to_string()), Brussels).unwrap();
        assert_eq!(resolved.hour(), 10);
    }

    #[test]
    fn naive_strings_are_assigned_the_target_zone() {
        let resolved =
            resolve(&DateInput::Text("2024-01-10T09:00:00".to_string()), Brussels).unwrap();

        // Wall clock unchanged, zone assigned rather than converted from UTC
        assert_eq!(resolved.hour(), 9);
        assert_eq!(resolved.offset().fix().local_minus_utc(), 3600);
    }

    #[test]
    fn bare_dates_resolve_to_local_midnight() {
        let resolved = resolve(&DateInput::Text("2024-01-10".to_string()), Brussels).unwrap();
        assert_eq!(resolved.hour(), 0);
        assert_eq!(
            resolved.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn ambiguous_local_times_take_the_earlier_instant() {
        // 02:30 on 2024-10-27 happens twice in Brussels (DST fold); the
        // earlier occurrence is still on summer time.
        let resolved =
            resolve(&DateInput::Text("2024-10-27T02:30:00".to_string()), Brussels).unwrap();
        assert_eq!(resolved.offset().fix().local_minus_utc(), 7200);
    }

    #[test]
    fn nonexistent_local_times_fail() {
        // 02:30 on 2024-03-31 is skipped in Brussels (spring forward).
        let err =
            resolve(&DateInput::Text("2024-03-31T02:30:00".to_string()), Brussels).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedType(_)));
    }

    #[test]
    fn garbage_strings_fail() {
        let err = resolve(&DateInput::Text("next tuesday".to_string()), Brussels).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedType(_)));
    }
}
