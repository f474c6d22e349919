use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use crate::error::{LeoError, LeoResult};

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATE_TIME: &str = "%Y-%m-%d %H%M";
const SLASH_DATE_TIME: &str = "%d/%m/%Y %H%M";

const DISPLAY_DATE: &str = "%b %-d %Y";
const DISPLAY_DATE_TIME: &str = "%b %-d %Y %-I:%M%p";

const STORED_DATE_TIME: &str = "%Y-%m-%dT%H:%M";
const STORED_DATE_TIME_SECS: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a date/time typed by the user.
///
/// Accepted forms, tried in order:
/// - `yyyy-MM-dd` (midnight)
/// - `yyyy-MM-dd HHmm`
/// - `d/M/yyyy HHmm`
pub fn parse_human(raw: &str) -> LeoResult<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(LeoError::parse("Date/time cannot be empty."));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, ISO_DATE) {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, ISO_DATE_TIME) {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, SLASH_DATE_TIME) {
        return Ok(dt);
    }
    Err(LeoError::parse(
        "Invalid date/time format. Try yyyy-MM-dd, yyyy-MM-dd HHmm, or d/M/yyyy HHmm.",
    ))
}

/// Renders a date/time for display, dropping the time of day when it is midnight.
pub fn format_human(dt: &NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format(DISPLAY_DATE).to_string()
    } else {
        dt.format(DISPLAY_DATE_TIME).to_string()
    }
}

/// Parses a timestamp read back from the data file.
pub fn parse_stored(raw: &str) -> LeoResult<NaiveDateTime> {
    let s = raw.trim();
    let parsed = if s.contains('T') {
        NaiveDateTime::parse_from_str(s, STORED_DATE_TIME_SECS)
            .or_else(|_| NaiveDateTime::parse_from_str(s, STORED_DATE_TIME))
    } else {
        NaiveDate::parse_from_str(s, ISO_DATE).map(|d| d.and_time(NaiveTime::MIN))
    };
    parsed.map_err(|_| LeoError::CorruptedData(format!("bad date/time '{}'", raw)))
}

/// Renders a date/time in the machine format used by the data file. Seconds
/// are written only when non-zero.
pub fn format_stored(dt: &NaiveDateTime) -> String {
    if dt.second() != 0 {
        return dt.format(STORED_DATE_TIME_SECS).to_string();
    }
    dt.format(STORED_DATE_TIME).to_string()
}
