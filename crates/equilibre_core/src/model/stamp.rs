//! Local-clock stamps written into newly created records.
//!
//! Formats follow the en-US locale strings the mobile app has always stored,
//! so records written here sort alongside existing ones.

use chrono::{DateTime, Local};

/// `1/2/2024`
pub fn date_stamp(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

/// `9:05:07 AM`, used by diary entries.
pub fn time_stamp(now: DateTime<Local>) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// `09:05 AM`, used by audio notes (two-digit hour, no seconds).
pub fn short_time_stamp(now: DateTime<Local>) -> String {
    now.format("%I:%M %p").to_string()
}

/// `1/2/2024, 9:05:07 AM`, used by task creation/completion.
pub fn date_time_stamp(now: DateTime<Local>) -> String {
    format!("{}, {}", date_stamp(now), time_stamp(now))
}

/// Creation-time epoch milliseconds, used for record ids.
pub fn epoch_millis(now: DateTime<Local>) -> i64 {
    now.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::{date_stamp, date_time_stamp, epoch_millis, short_time_stamp, time_stamp};
    use chrono::{Local, NaiveDate, TimeZone, Utc};

    #[test]
    fn stamps_match_stored_locale_formats() {
        let wall_clock = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(21, 5, 7)
            .unwrap();
        let now = Local.from_local_datetime(&wall_clock).single().unwrap();
        assert_eq!(date_stamp(now), "1/2/2024");
        assert_eq!(time_stamp(now), "9:05:07 PM");
        assert_eq!(short_time_stamp(now), "09:05 PM");
        assert_eq!(date_time_stamp(now), "1/2/2024, 9:05:07 PM");
    }

    #[test]
    fn epoch_millis_is_independent_of_local_offset() {
        let instant = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
            .with_timezone(&Local);
        assert_eq!(epoch_millis(instant), 1_704_067_200_000);
    }
}
