//! Lenient date-time parsing for stored timestamp strings.
//!
//! Records carry locale-formatted strings such as `1/2/2024, 9:00:00 AM`
//! or `1/1/2024 10:00 AM`. ISO-8601 strings are accepted as well. Anything
//! else parses to `None`, which orders before every valid instant.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static US_DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<month>\d{1,2})/(?P<day>\d{1,2})/(?P<year>\d{4})
        (?:
            ,?\s+
            (?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2}))?
            (?:\s*(?P<meridiem>[AaPp])\.?\s*[Mm]\.?)?
        )?$",
    )
    .expect("valid us date-time regex")
});

const ISO_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a stored timestamp into a local wall-clock instant.
pub fn parse_instant(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_us_locale(trimmed).or_else(|| parse_iso(trimmed))
}

fn parse_us_locale(value: &str) -> Option<NaiveDateTime> {
    let caps = US_DATE_TIME_RE.captures(value)?;
    let number = |name: &str| -> Option<u32> { caps.name(name)?.as_str().parse().ok() };

    let date = NaiveDate::from_ymd_opt(
        caps.name("year")?.as_str().parse().ok()?,
        number("month")?,
        number("day")?,
    )?;

    let Some(mut hour) = number("hour") else {
        return Some(date.and_time(NaiveTime::MIN));
    };
    let minute = number("minute")?;
    let second = number("second").unwrap_or(0);

    if let Some(meridiem) = caps.name("meridiem") {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let is_pm = meridiem.as_str().eq_ignore_ascii_case("p");
        hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    date.and_hms_opt(hour, minute, second)
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    for format in ISO_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::parse_instant;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_stored_locale_shapes() {
        assert_eq!(parse_instant("1/1/2024 10:00 AM"), Some(at(2024, 1, 1, 10, 0, 0)));
        assert_eq!(
            parse_instant("1/2/2024, 9:00:00 AM"),
            Some(at(2024, 1, 2, 9, 0, 0))
        );
        assert_eq!(
            parse_instant("12/31/2023 11:59:59 PM"),
            Some(at(2023, 12, 31, 23, 59, 59))
        );
        assert_eq!(parse_instant("1/1/2024"), Some(at(2024, 1, 1, 0, 0, 0)));
        assert_eq!(parse_instant("3/4/2024 07:05 pm"), Some(at(2024, 3, 4, 19, 5, 0)));
        assert_eq!(parse_instant("3/4/2024 17:05"), Some(at(2024, 3, 4, 17, 5, 0)));
    }

    #[test]
    fn twelve_oclock_meridiem_edges() {
        assert_eq!(parse_instant("1/1/2024 12:00 AM"), Some(at(2024, 1, 1, 0, 0, 0)));
        assert_eq!(parse_instant("1/1/2024 12:30 PM"), Some(at(2024, 1, 1, 12, 30, 0)));
    }

    #[test]
    fn parses_iso_shapes() {
        assert_eq!(
            parse_instant("2024-01-02T09:00:00"),
            Some(at(2024, 1, 2, 9, 0, 0))
        );
        assert_eq!(parse_instant("2024-01-02 09:00"), Some(at(2024, 1, 2, 9, 0, 0)));
        assert_eq!(parse_instant("2024-01-02"), Some(at(2024, 1, 2, 0, 0, 0)));
    }

    #[test]
    fn rejects_garbage_and_out_of_range_components() {
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("undefined undefined"), None);
        assert_eq!(parse_instant("13/01/2024 10:00"), None);
        assert_eq!(parse_instant("2/30/2024"), None);
        assert_eq!(parse_instant("1/1/2024 13:00 PM"), None);
        assert_eq!(parse_instant("1/1/2024 25:00"), None);
    }
}
