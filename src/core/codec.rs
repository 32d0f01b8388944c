//! Text layout shared by the save file and the on-screen line.
//!
//! Under an hour the layout is `MM:SS.CC` (exactly 8 characters). From one
//! hour up it is `H:MM:SS.CC` with as many hour digits as needed. Centiseconds
//! are truncated. Decoding picks the layout by counting `:`-separated fields
//! rather than by string length.

use thiserror::Error;

use crate::shared::constants::{NANOS_PER_CENTI, SECS_PER_HOUR, SECS_PER_MINUTE};
use crate::sync::Duration;

/// Length of the shortest valid record, `MM:SS.CC`.
pub const MIN_RECORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("record too short: {len} characters, need at least 8")]
    TooShort { len: usize },
    #[error("unrecognised record layout: {fields} ':'-separated fields")]
    Layout { fields: usize },
    #[error("invalid {field} field: {value:?}")]
    Field { field: &'static str, value: String },
}

pub fn encode(d: Duration) -> String {
    let (secs, nanos) = if d.is_negative() {
        (0, 0)
    } else {
        (d.secs(), d.subsec_nanos())
    };
    let centis = nanos / NANOS_PER_CENTI;

    if secs >= SECS_PER_HOUR {
        format!(
            "{}:{:02}:{:02}.{:02}",
            secs / SECS_PER_HOUR,
            secs % SECS_PER_HOUR / SECS_PER_MINUTE,
            secs % SECS_PER_MINUTE,
            centis
        )
    } else {
        format!(
            "{:02}:{:02}.{:02}",
            secs / SECS_PER_MINUTE,
            secs % SECS_PER_MINUTE,
            centis
        )
    }
}

pub fn decode(text: &str) -> Result<Duration, ParseError> {
    let text = strip_terminator(text);
    if text.len() < MIN_RECORD_LEN {
        return Err(ParseError::TooShort { len: text.len() });
    }

    let fields: Vec<&str> = text.split(':').collect();
    let (hours, minutes, rest) = match fields.as_slice() {
        [mm, rest] => (0, fixed_field("minutes", mm)?, *rest),
        [h, mm, rest] => (hours_field(h)?, fixed_field("minutes", mm)?, *rest),
        _ => return Err(ParseError::Layout { fields: fields.len() }),
    };

    let Some((ss, cc)) = rest.split_once('.') else {
        return Err(field_error("seconds", rest));
    };
    let seconds = fixed_field("seconds", ss)?;
    let centis = fixed_field("centiseconds", cc)?;

    if minutes >= SECS_PER_MINUTE {
        return Err(field_error("minutes", fields[fields.len() - 2]));
    }
    if seconds >= SECS_PER_MINUTE {
        return Err(field_error("seconds", ss));
    }

    let total = hours
        .checked_mul(SECS_PER_HOUR)
        .and_then(|h| h.checked_add(minutes * SECS_PER_MINUTE + seconds))
        .ok_or_else(|| field_error("hours", fields[0]))?;

    Ok(Duration::new(total, centis * NANOS_PER_CENTI as i64))
}

fn strip_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text)
}

fn field_error(field: &'static str, value: &str) -> ParseError {
    ParseError::Field {
        field,
        value: value.to_string(),
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly two ASCII digits.
fn fixed_field(field: &'static str, s: &str) -> Result<i64, ParseError> {
    if s.len() != 2 || !all_digits(s) {
        return Err(field_error(field, s));
    }
    s.parse().map_err(|_| field_error(field, s))
}

fn hours_field(s: &str) -> Result<i64, ParseError> {
    if !all_digits(s) {
        return Err(field_error("hours", s));
    }
    s.parse().map_err(|_| field_error("hours", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_under_an_hour() {
        assert_eq!(encode(Duration::from_millis(65_000)), "01:05.00");
        assert_eq!(encode(Duration::ZERO), "00:00.00");
        assert_eq!(encode(Duration::from_millis(3_599_990)), "59:59.99");
    }

    #[test]
    fn encodes_hours_with_variable_width() {
        assert_eq!(encode(Duration::from_millis(3_723_400)), "1:02:03.40");
        assert_eq!(encode(Duration::from_secs(3_600)), "1:00:00.00");
        assert_eq!(encode(Duration::from_secs(100 * 3_600 + 1)), "100:00:01.00");
    }

    #[test]
    fn truncates_centiseconds() {
        assert_eq!(encode(Duration::new(1, 999_999_999)), "00:01.99");
        assert_eq!(encode(Duration::new(1, 9_999_999)), "00:01.00");
    }

    #[test]
    fn negative_encodes_as_zero() {
        assert_eq!(encode(Duration::from_millis(-1_500)), "00:00.00");
    }

    #[test]
    fn hour_record_round_trips() {
        let d = decode("1:02:03.40").unwrap();
        assert_eq!(d, Duration::new(3_723, 400_000_000));
        assert_eq!(encode(d), "1:02:03.40");
    }

    #[test]
    fn round_trips_across_the_hour_boundary() {
        for millis in [0i64, 10, 59_990, 3_599_990, 3_600_000, 3_600_010, 86_400_000] {
            let d = Duration::from_millis(millis);
            assert_eq!(decode(&encode(d)), Ok(d), "{millis} ms");
        }
    }

    #[test]
    fn accepts_trailing_terminator() {
        assert_eq!(decode("01:05.00\n"), Ok(Duration::from_secs(65)));
        assert_eq!(decode("1:00:00.00\r\n"), Ok(Duration::from_secs(3_600)));
    }

    #[test]
    fn rejects_short_text() {
        assert_eq!(decode(""), Err(ParseError::TooShort { len: 0 }));
        assert_eq!(decode("abc"), Err(ParseError::TooShort { len: 3 }));
        assert_eq!(decode("1:05.00\n"), Err(ParseError::TooShort { len: 7 }));
    }

    #[test]
    fn rejects_unknown_layouts() {
        assert_eq!(decode("0105.000"), Err(ParseError::Layout { fields: 1 }));
        assert_eq!(decode("1:1:01:05.00"), Err(ParseError::Layout { fields: 4 }));
    }

    #[test]
    fn rejects_bad_fields() {
        assert!(matches!(decode("61:05.00"), Err(ParseError::Field { field: "minutes", .. })));
        assert!(matches!(decode("01:65.00"), Err(ParseError::Field { field: "seconds", .. })));
        assert!(matches!(decode("01:05.0x"), Err(ParseError::Field { field: "centiseconds", .. })));
        assert!(matches!(decode("1:2:03.40"), Err(ParseError::Field { field: "minutes", .. })));
        assert!(matches!(decode("x:02:03.40"), Err(ParseError::Field { field: "hours", .. })));
        assert!(matches!(decode("01:05:000"), Err(ParseError::Field { .. })));
    }
}
