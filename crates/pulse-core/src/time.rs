//! Instant parsing and "days until" arithmetic.
//!
//! Persisted dates are RFC 3339 instants. The editor additionally accepts
//! the `YYYY-MM-DDTHH:MM` shape a date/time form field produces, read in
//! the local timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

const LOCAL_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a persisted instant: RFC 3339, or a bare `YYYY-MM-DD` read as UTC
/// midnight.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse editor input in the local timezone.
#[must_use]
pub fn parse_local_input(raw: &str) -> Option<DateTime<Utc>> {
    parse_input_in(raw, &Local)
}

/// Parse editor input: anything [`parse_instant`] accepts, or a
/// timezone-less date/time read in `tz`.
///
/// Returns `None` for unparseable text and for wall-clock times skipped by a
/// DST transition.
#[must_use]
pub fn parse_input_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Some(instant) = parse_instant(raw) {
        return Some(instant);
    }
    let raw = raw.trim();
    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

/// Render an instant as a local `YYYY-MM-DDTHH:MM` form value.
#[must_use]
pub fn to_local_input(date: DateTime<Utc>) -> String {
    to_input_in(date, &Local)
}

/// Render an instant as a `YYYY-MM-DDTHH:MM` form value in `tz`.
#[must_use]
pub fn to_input_in<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%Y-%m-%dT%H:%M").to_string()
}

/// Whole days from `now` until `date`, rounded up.
///
/// Negative once the date has passed: an event exactly one week ago is `-7`.
#[must_use]
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = (date - now).num_milliseconds();
    let days = diff.div_euclid(MS_PER_DAY);
    if diff.rem_euclid(MS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn at(raw: &str) -> DateTime<Utc> {
        parse_instant(raw).expect("valid instant")
    }

    #[test]
    fn parses_rfc3339_with_offsets_and_fractions() {
        assert_eq!(
            at("2025-11-02T18:30:00Z"),
            at("2025-11-02T19:30:00+01:00")
        );
        assert_eq!(
            at("2025-11-02T18:30:00.000Z"),
            at("2025-11-02T18:30:00Z")
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(at("2025-01-08"), at("2025-01-08T00:00:00Z"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("next tuesday").is_none());
        assert!(parse_instant("").is_none());
        assert!(parse_instant("2025-13-40T00:00:00Z").is_none());
    }

    #[test]
    fn form_input_is_read_in_the_given_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).expect("offset");
        let parsed = parse_input_in("2025-06-01T12:00", &tz).expect("parses");
        assert_eq!(parsed, at("2025-06-01T10:00:00Z"));
        assert_eq!(to_input_in(parsed, &tz), "2025-06-01T12:00");
    }

    #[test]
    fn form_input_still_accepts_full_instants() {
        let tz = FixedOffset::west_opt(5 * 3600).expect("offset");
        assert_eq!(
            parse_input_in("2025-06-01T12:00:00Z", &tz),
            Some(at("2025-06-01T12:00:00Z"))
        );
        assert!(parse_input_in("soon", &tz).is_none());
    }

    #[test]
    fn days_until_rounds_up() {
        let now = at("2025-01-01T00:00:00Z");
        assert_eq!(days_until(at("2025-01-08T00:00:00Z"), now), 7);
        assert_eq!(days_until(now + Duration::milliseconds(1), now), 1);
        assert_eq!(days_until(now + Duration::hours(25), now), 2);
        assert_eq!(days_until(now, now), 0);
    }

    #[test]
    fn days_until_is_negative_for_past_dates() {
        let now = at("2025-01-08T00:00:00Z");
        assert_eq!(days_until(at("2025-01-01T00:00:00Z"), now), -7);
        assert_eq!(days_until(now - Duration::milliseconds(1), now), 0);
        assert_eq!(days_until(now - Duration::hours(36), now), -1);
    }
}
