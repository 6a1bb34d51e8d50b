//! Local wall-clock dates and times as the dashboard API exchanges them.
//!
//! The API carries local time with no offset attached, so nothing in here
//! goes through UTC or epoch accessors: every conversion reads and writes
//! the calendar/clock fields of the value it is handed.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use error::{FormatError, FormatKind};

/// Shape of the `startTime`/`endTime` strings sent to the API.
pub const TRANSPORT_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

/// Today in the process's local timezone, as `YYYY-MM-DD`.
pub fn current_local_date() -> String {
    format_date(&Local::now())
}

/// Tomorrow in the process's local timezone, as `YYYY-MM-DD`.
pub fn next_local_date() -> String {
    format_date(&day_after(Local::now().date_naive()))
}

/// The calendar day following `date`. Saturates at the last representable day.
pub fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Formats the year/month/day fields of `date` as `YYYY-MM-DD`.
///
/// For a `DateTime<Tz>` these are the fields in `Tz`, so 00:30 local time
/// stays on its local calendar day.
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Minutes since midnight for an `HH:MM` string.
///
/// Only the shape is checked, not the range, so `"24:00"` yields 1440.
/// Surrounding whitespace is a format error.
pub fn time_to_minutes(time: &str) -> Result<u32, FormatError> {
    let fields = numeric_fields(time, ':', 2, FormatKind::Time)?;
    fields[0]
        .checked_mul(60)
        .and_then(|minutes| minutes.checked_add(fields[1]))
        .ok_or_else(|| FormatError::new(FormatKind::Time, time))
}

pub fn parse_date(date: &str) -> Result<NaiveDate, FormatError> {
    let fields = numeric_fields(date, '-', 3, FormatKind::Date)?;
    if fields[0] > i32::max_value() as u32 {
        return Err(FormatError::new(FormatKind::Date, date));
    }
    NaiveDate::from_ymd_opt(fields[0] as i32, fields[1], fields[2])
        .ok_or_else(|| FormatError::new(FormatKind::Date, date))
}

pub fn parse_time(time: &str) -> Result<NaiveTime, FormatError> {
    let fields = numeric_fields(time, ':', 2, FormatKind::Time)?;
    NaiveTime::from_hms_opt(fields[0], fields[1], 0)
        .ok_or_else(|| FormatError::new(FormatKind::Time, time))
}

/// Builds the local instant for a `YYYY-MM-DD` date and an `HH:MM` time,
/// with seconds and sub-seconds at zero.
pub fn combine(date: &str, time: &str) -> Result<NaiveDateTime, FormatError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

/// Renders `YYYY-MM-DDTHH:MM:SS` from the value's own (local) fields.
pub fn to_transport_string<T: Datelike + Timelike>(instant: &T) -> String {
    format!(
        "{}T{:02}:{:02}:{:02}",
        format_date(instant),
        instant.hour(),
        instant.minute(),
        instant.second()
    )
}

/// Parses a transport string into local wall-clock time.
///
/// Offset-free strings are already local and are taken as-is. Strings
/// carrying an RFC 3339 offset are moved into `tz` first.
pub fn parse_transport_in<Tz: TimeZone>(
    transport: &str,
    tz: &Tz,
) -> Result<NaiveDateTime, FormatError> {
    let trimmed = transport.trim();

    for format in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.with_timezone(tz).naive_local())
        .map_err(|_| FormatError::new(FormatKind::Transport, transport))
}

pub fn parse_transport(transport: &str) -> Result<NaiveDateTime, FormatError> {
    parse_transport_in(transport, &Local)
}

/// The `HH:MM` time of day of a transport string.
pub fn extract_time(transport: &str) -> Result<String, FormatError> {
    extract_time_in(transport, &Local)
}

pub fn extract_time_in<Tz: TimeZone>(transport: &str, tz: &Tz) -> Result<String, FormatError> {
    let instant = parse_transport_in(transport, tz)?;
    Ok(format!("{:02}:{:02}", instant.hour(), instant.minute()))
}

/// The `YYYY-MM-DD` local calendar day of a transport string.
pub fn transport_date(transport: &str) -> Result<String, FormatError> {
    transport_date_in(transport, &Local)
}

pub fn transport_date_in<Tz: TimeZone>(transport: &str, tz: &Tz) -> Result<String, FormatError> {
    parse_transport_in(transport, tz).map(|instant| format_date(&instant))
}

fn numeric_fields(
    input: &str,
    separator: char,
    count: usize,
    kind: FormatKind,
) -> Result<Vec<u32>, FormatError> {
    let fields: Vec<&str> = input.split(separator).collect();
    if fields.len() != count {
        return Err(FormatError::new(kind, input));
    }

    fields
        .iter()
        .map(|field| {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormatError::new(kind, input));
            }
            field.parse().map_err(|_| FormatError::new(kind, input))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn format_date_uses_the_values_own_fields() {
        for hours in &[-11, -5, 0, 3, 9, 14] {
            let tz = FixedOffset::east_opt(hours * 3600).unwrap();
            let early = tz.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
            let late = tz.with_ymd_and_hms(2023, 12, 31, 23, 45, 0).unwrap();

            assert_eq!(format_date(&early), "2024-01-01");
            assert_eq!(format_date(&late), "2023-12-31");
        }
    }

    #[test]
    fn format_date_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(987, 3, 4).unwrap();
        assert_eq!(format_date(&date), "0987-03-04");
    }

    #[test]
    fn day_after_rolls_month_and_year() {
        let cases = [
            ((2024, 1, 31), (2024, 2, 1)),
            ((2024, 2, 28), (2024, 2, 29)),
            ((2023, 2, 28), (2023, 3, 1)),
            ((2024, 4, 30), (2024, 5, 1)),
            ((2024, 12, 31), (2025, 1, 1)),
        ];
        for &((y, m, d), (ny, nm, nd)) in cases.iter() {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(day_after(date), NaiveDate::from_ymd_opt(ny, nm, nd).unwrap());
        }
    }

    #[test]
    fn current_and_next_date_are_one_day_apart() {
        let today = parse_date(&current_local_date()).unwrap();
        let tomorrow = parse_date(&next_local_date()).unwrap();

        // Tolerates the clock crossing midnight between the two calls.
        let gap = tomorrow.signed_duration_since(today).num_days();
        assert!(gap == 1 || gap == 2, "gap was {}", gap);
    }

    #[test]
    fn time_to_minutes_known_values() {
        assert_eq!(time_to_minutes("00:00"), Ok(0));
        assert_eq!(time_to_minutes("23:59"), Ok(1439));
        assert_eq!(time_to_minutes("12:00"), Ok(720));
        assert_eq!(time_to_minutes("24:00"), Ok(1440));
    }

    #[test]
    fn time_to_minutes_rejects_malformed() {
        for input in &["9", "", "09:", ":30", "ab:cd", "09:30:00", "-1:30", "9 :3x"] {
            let err = time_to_minutes(input).unwrap_err();
            assert_eq!(err.kind, FormatKind::Time);
            assert_eq!(err.input, *input);
        }
    }

    #[test]
    fn time_to_minutes_errors_instead_of_overflowing() {
        for input in &["4294967295:00", "71582789:00", "71582788:9999"] {
            let err = time_to_minutes(input).unwrap_err();
            assert_eq!(err.kind, FormatKind::Time);
        }
        assert_eq!(time_to_minutes("71582788:15"), Ok(4294967295));
    }

    #[test]
    fn padded_values_are_not_times_or_dates() {
        for input in &[" 00:00", "00:00 ", "09: 30", "\t12:00"] {
            assert_eq!(time_to_minutes(input).unwrap_err().kind, FormatKind::Time);
            assert_eq!(parse_time(input).unwrap_err().kind, FormatKind::Time);
        }
        assert_eq!(parse_date(" 2024-03-01").unwrap_err().kind, FormatKind::Date);
    }

    #[test]
    fn oversized_year_is_a_date_error() {
        assert_eq!(
            parse_date("4294967295-01-01").unwrap_err().kind,
            FormatKind::Date
        );
    }

    #[test]
    fn combine_zeroes_seconds() {
        let instant = combine("2024-03-01", "23:30").unwrap();
        assert_eq!(instant.second(), 0);
        assert_eq!(instant.nanosecond(), 0);
        assert_eq!(to_transport_string(&instant), "2024-03-01T23:30:00");
    }

    #[test]
    fn combine_rejects_bad_segments() {
        assert_eq!(
            combine("2024-03", "10:00").unwrap_err().kind,
            FormatKind::Date
        );
        assert_eq!(
            combine("2024-02-30", "10:00").unwrap_err().kind,
            FormatKind::Date
        );
        assert_eq!(
            combine("2024-03-01", "1000").unwrap_err().kind,
            FormatKind::Time
        );
        assert_eq!(
            combine("2024-03-01", "24:00").unwrap_err().kind,
            FormatKind::Time
        );
    }

    #[test]
    fn transport_string_reads_local_fields() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let instant = tz.with_ymd_and_hms(2024, 7, 9, 8, 5, 3).unwrap();
        assert_eq!(to_transport_string(&instant), "2024-07-09T08:05:03");
    }

    #[test]
    fn extract_time_round_trips_through_transport() {
        for &(date, time) in &[
            ("2024-03-01", "00:00"),
            ("2024-03-01", "09:05"),
            ("2024-12-31", "23:59"),
            ("2023-06-15", "12:30"),
        ] {
            let transport = to_transport_string(&combine(date, time).unwrap());
            assert_eq!(extract_time(&transport).unwrap(), time);
            assert_eq!(transport_date(&transport).unwrap(), date);
        }
    }

    #[test]
    fn offset_strings_are_moved_to_local() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            extract_time_in("2024-03-01T22:30:00Z", &tz).unwrap(),
            "00:30"
        );
        assert_eq!(
            transport_date_in("2024-03-01T22:30:00Z", &tz).unwrap(),
            "2024-03-02"
        );
        // Naive strings are local already and are left alone.
        assert_eq!(
            extract_time_in("2024-03-01T22:30:00", &tz).unwrap(),
            "22:30"
        );
    }

    #[test]
    fn transport_accepts_fractions_and_missing_seconds() {
        assert_eq!(extract_time("2024-03-01T07:15:00.000").unwrap(), "07:15");
        assert_eq!(extract_time("2024-03-01T07:15").unwrap(), "07:15");
    }

    #[test]
    fn transport_rejects_garbage() {
        let err = extract_time("yesterday at noon").unwrap_err();
        assert_eq!(err.kind, FormatKind::Transport);
    }
}
