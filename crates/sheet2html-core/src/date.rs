//! Excel serial date conversion
//!
//! Spreadsheets store dates as serial numbers: whole days since a base date
//! plus a fraction of a day. In the 1900 date system Excel also counts the
//! non-existent day 1900-02-29 as serial 60, so serials below 61 are offset
//! from 1899-12-31 and everything later from 1899-12-30. The fictional day
//! therefore lands on 1900-03-01, the same as serial 61.

use chrono::{Duration, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// First serial that would fall in the year 10000 (1900 system)
const MAX_SERIAL: f64 = 2_958_466.0;

fn base_date(whole_days: i64, date_1904: bool) -> Option<NaiveDate> {
    if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)
    } else if whole_days < 61 {
        NaiveDate::from_ymd_opt(1899, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)
    }
}

/// Convert a serial date number to a calendar date-time.
///
/// The fraction of the day is rounded to the nearest millisecond. Returns
/// `None` for negative, non-finite or out-of-range serials, which are not
/// valid dates in either date system.
pub fn serial_to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL {
        return None;
    }

    let whole_days = serial.floor();
    let millis = ((serial - whole_days) * MILLIS_PER_DAY + 0.5).floor() as i64;
    let whole_days = whole_days as i64;

    base_date(whole_days, date_1904)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(whole_days))?
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Convert a calendar date-time to a serial date number.
///
/// Inverse of [`serial_to_datetime`] for dates from 1900-03-01 onwards in the
/// 1900 system and from 1904-01-01 in the 1904 system.
pub fn datetime_to_serial(datetime: NaiveDateTime, date_1904: bool) -> Option<f64> {
    let base = if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let elapsed = datetime - base.and_hms_opt(0, 0, 0)?;
    Some(elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY)
}
