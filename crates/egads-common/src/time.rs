//! Time handling utilities for airborne measurement data.
//!
//! Instrument files describe their timestamps with human calendar templates
//! such as `yyyy-mm-dd HH:MM:ss`. These are rewritten into the strftime
//! grammar understood by `chrono` before any parsing happens.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CommonError, CommonResult};

/// Calendar tokens and their strftime directives, in priority order.
///
/// Within a letter class the longer token comes first so that `yyyy` is
/// consumed before `yy` gets a chance to split it.
const FORMAT_TOKENS: [(&str, &str); 9] = [
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("mm", "%m"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("hh", "%H"),
    ("MM", "%M"),
    ("ss", "%S"),
    ("SS", "%S"),
];

/// Rewrite a calendar-format template into strftime directives.
///
/// The template is scanned once, left to right. At each position the first
/// token in [`FORMAT_TOKENS`] order that matches is replaced; emitted
/// directives are never scanned again. Anything that is not a known token
/// passes through unchanged, including lone leftover letters.
///
/// ```
/// use egads_common::translate_time_format;
///
/// assert_eq!(translate_time_format("yyyy-mm-dd HH:MM:ss"), "%Y-%m-%d %H:%M:%S");
/// ```
pub fn translate_time_format(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while !rest.is_empty() {
        for (token, directive) in FORMAT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(directive);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Parse a timestamp described by a calendar-format template.
///
/// Templates without a time of day yield midnight.
pub fn parse_with_format(value: &str, template: &str) -> CommonResult<NaiveDateTime> {
    let format = translate_time_format(template);

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, &format) {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(value, &format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CommonError::TimeParse {
            value: value.to_string(),
            format,
        })
}

/// Individual fields of a `YYYY-MM-DD hh:mm:ss` style timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateTimeComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Split a date-time string into its components.
///
/// Accepts a four digit year followed by one- or two-digit month and day,
/// each preceded by any single separator character. Date and time are split
/// by whitespace or `T`. Seconds may carry a fractional part.
pub fn datetime_components(s: &str) -> CommonResult<DateTimeComponents> {
    let invalid = || CommonError::InvalidDateTime(s.to_string());

    let (year, month, day, rest) = split_date(s).ok_or_else(invalid)?;
    let (hour, rest) = take_digits(rest, 1, usize::MAX).ok_or_else(invalid)?;
    let rest = rest.strip_prefix(':').ok_or_else(invalid)?;
    let (minute, rest) = take_digits(rest, 1, usize::MAX).ok_or_else(invalid)?;
    let rest = rest.strip_prefix(':').ok_or_else(invalid)?;

    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let second: f64 = rest.trim_end().parse().map_err(|_| invalid())?;

    Ok(DateTimeComponents {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// Compact a long date-time string into `YYYYMMDDHH`.
///
/// Strings that do not start with a recognisable date and hour are
/// returned unchanged.
pub fn to_yyyymmddhh(s: &str) -> String {
    let compact = split_date(s).and_then(|(year, month, day, rest)| {
        let (hour, rest) = take_digits(rest, 1, usize::MAX)?;
        rest.starts_with(':')
            .then(|| format!("{:04}{:02}{:02}{:02}", year, month, day, hour))
    });

    compact.unwrap_or_else(|| s.to_string())
}

/// Parse `YYYY?M?D` plus the date/time separator, returning the remainder.
fn split_date(s: &str) -> Option<(i32, u32, u32, &str)> {
    let (year, rest) = take_digits(s, 4, 4)?;
    let (month, rest) = take_digits(skip_one(rest)?, 1, 2)?;
    let (day, rest) = take_digits(skip_one(rest)?, 1, 2)?;

    let rest = match rest.strip_prefix('T') {
        Some(after) => after,
        None => {
            let trimmed = rest.trim_start();
            if trimmed.len() == rest.len() {
                return None;
            }
            trimmed
        }
    };

    Some((year as i32, month, day, rest))
}

fn skip_one(s: &str) -> Option<&str> {
    let mut chars = s.chars();
    chars.next()?;
    Some(chars.as_str())
}

/// Take between `min` and `max` leading ASCII digits.
fn take_digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let count = s
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if count < min {
        return None;
    }
    let value = s[..count].parse().ok()?;
    Some((value, &s[count..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_translate_iso_like_template() {
        assert_eq!(
            translate_time_format("yyyy-mm-dd HH:MM:ss"),
            "%Y-%m-%d %H:%M:%S"
        );
    }

    #[test]
    fn test_translate_lowercase_hour_alias() {
        assert_eq!(translate_time_format("dd/mm/yyyy hh:MM"), "%d/%m/%Y %H:%M");
    }

    #[test]
    fn test_translate_two_digit_year_and_second_alias() {
        assert_eq!(translate_time_format("yymmdd HHMMSS"), "%y%m%d %H%M%S");
    }

    #[test]
    fn test_translate_passes_unknown_text_through() {
        assert_eq!(translate_time_format("UTC T+0"), "UTC T+0");
        assert_eq!(translate_time_format(""), "");
    }

    #[test]
    fn test_translate_overlapping_tokens() {
        assert_eq!(translate_time_format("yyy"), "%yy");
        assert_eq!(translate_time_format("yyyyyy"), "%Y%y");
        assert_eq!(translate_time_format("mmm"), "%mm");
        assert_eq!(translate_time_format("SSS"), "%SS");
        // the %S emitted for `ss` must not be read back as part of `SS`
        assert_eq!(translate_time_format("ssS"), "%SS");
        assert_eq!(translate_time_format("hhH:MMM"), "%HH:%MM");
    }

    #[test]
    fn test_translate_is_fixed_point() {
        for template in ["yyyy-mm-dd HH:MM:ss", "dd/mm/yyyy hh:MM", "yy.mm.dd SS"] {
            let once = translate_time_format(template);
            assert_eq!(translate_time_format(&once), once);
        }
    }

    #[test]
    fn test_parse_with_format() {
        let dt = parse_with_format("2012-07-06 17:42:09", "yyyy-mm-dd HH:MM:ss").unwrap();
        assert_eq!(dt.year(), 2012);
        assert_eq!(dt.month(), 7);
        assert_eq!(dt.day(), 6);
        assert_eq!(dt.hour(), 17);
        assert_eq!(dt.minute(), 42);
        assert_eq!(dt.second(), 9);
    }

    #[test]
    fn test_parse_date_only_template() {
        let dt = parse_with_format("06/07/2012", "dd/mm/yyyy").unwrap();
        assert_eq!(dt.day(), 6);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_with_format_rejects_mismatch() {
        let result = parse_with_format("not a date", "yyyy-mm-dd");
        assert!(matches!(result, Err(CommonError::TimeParse { .. })));
    }

    #[test]
    fn test_datetime_components() {
        let parts = datetime_components("2009-01-15 06:30:12.5").unwrap();
        assert_eq!(parts.year, 2009);
        assert_eq!(parts.month, 1);
        assert_eq!(parts.day, 15);
        assert_eq!(parts.hour, 6);
        assert_eq!(parts.minute, 30);
        assert!((parts.second - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_datetime_components_t_separator_and_short_fields() {
        let parts = datetime_components("1999/3/7T23:05:00").unwrap();
        assert_eq!((parts.month, parts.day, parts.hour), (3, 7, 23));
    }

    #[test]
    fn test_datetime_components_invalid() {
        assert!(datetime_components("99-01-01 00:00:00").is_err());
        assert!(datetime_components("2009-01-15").is_err());
    }

    #[test]
    fn test_to_yyyymmddhh() {
        assert_eq!(to_yyyymmddhh("2009-1-5 6:00:00"), "2009010506");
        assert_eq!(to_yyyymmddhh("2009-12-25T18:30:00Z"), "2009122518");
        assert_eq!(to_yyyymmddhh("no date here"), "no date here");
    }
}
