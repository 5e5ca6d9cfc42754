//! Phone status-bar clock.

use chrono::{DateTime, TimeZone};

/// Format a time as `h:mm AM/PM`, e.g. `9:05 PM`.
pub fn format_phone_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_phone_time() {
        let evening = Utc.with_ymd_and_hms(2024, 5, 1, 21, 5, 0).unwrap();
        assert_eq!(format_phone_time(&evening), "9:05 PM");

        let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 30, 0).unwrap();
        assert_eq!(format_phone_time(&midnight), "12:30 AM");

        let noon = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_phone_time(&noon), "12:00 PM");
    }
}
