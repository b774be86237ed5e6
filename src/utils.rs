// Utility functions
use chrono::{DateTime, NaiveDate, NaiveTime};

/// Converts a unix timestamp to the calendar date at the given UTC offset (seconds).
pub fn timestamp_to_date(timestamp: i64, gmt_offset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmt_offset, 0).map(|dt| dt.date_naive())
}

/// Unix timestamp of midnight UTC on `date`.
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_open_maps_to_local_date() {
        // 2024-03-01 14:30 UTC, New York at -5h
        let date = timestamp_to_date(1_709_303_400, -18_000).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn offset_can_move_the_date() {
        // 2024-03-01 23:30 UTC is already the 2nd at +2h
        let date = timestamp_to_date(1_709_335_800, 7_200).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn midnight_timestamp() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(date_to_timestamp(date), 1_709_251_200);
    }
}
