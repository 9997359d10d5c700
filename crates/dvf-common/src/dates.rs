//! Conversions between `chrono` dates and the Polars `Date` representation.
//!
//! Polars stores a `Date` as the number of days since 1970-01-01.

use chrono::{Datelike, NaiveDate};

/// Days from 0001-01-01 (day 1 of the common era) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Polars physical value of a date.
pub fn days_from_date(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Date for a Polars physical value, `None` when out of range.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Midnight UTC of `date` with millisecond precision, the form document
/// databases accept for native dates: `YYYY-MM-DDT00:00:00.000Z`.
pub fn iso_datetime_utc(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00.000Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_day_zero() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_from_date(epoch), 0);
        assert_eq!(date_from_days(0), Some(epoch));
    }

    #[test]
    fn days_round_trip() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 14).unwrap();
        let days = days_from_date(date);
        assert_eq!(days, 18_700);
        assert_eq!(date_from_days(days), Some(date));
        assert_eq!(date_from_days(-1), NaiveDate::from_ymd_opt(1969, 12, 31));
    }

    #[test]
    fn iso_formats() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        assert_eq!(iso_date(date), "2021-01-05");
        assert_eq!(iso_datetime_utc(date), "2021-01-05T00:00:00.000Z");
    }
}
