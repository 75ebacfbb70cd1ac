use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

use crate::{CoreError, CoreResult};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses the date shapes seen in dashboard payloads: `YYYY-MM-DD`,
/// ISO date-times (time and offset discarded) and `DD.MM.YYYY`.
pub fn parse_transaction_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if looks_like_iso_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }
    if looks_like_dotted_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").ok();
    }
    if trimmed.len() > 10 && trimmed.is_char_boundary(10) && looks_like_iso_date(&trimmed[..10]) {
        return parse_iso_date_time(trimmed);
    }
    None
}

pub fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> CoreResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(CoreError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CoreError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

/// Moves `date` by whole months keeping the day-of-month. A day past the
/// end of the target month spills into the following month, so May 31
/// minus three months lands on March 3 (or March 2 in leap years).
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let current_month = i32::try_from(date.month()).ok()?;
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).ok()?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month_u32, 1)?;
    first_of_month.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

pub fn shift_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    shift_months(date, years.checked_mul(12)?)
}

/// Year and month of the calendar month before `date`'s month.
pub fn previous_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}

fn parse_iso_date_time(value: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|parsed| parsed.date())
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn looks_like_dotted_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[2] != b'.' || bytes[5] != b'.' {
        return false;
    }

    for index in [0usize, 1, 3, 4, 6, 7, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}
