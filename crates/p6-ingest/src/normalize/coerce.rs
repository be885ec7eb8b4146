//! Typed coercions from raw scalar values
//!
//! Each function accepts a [`Scalar`] and returns `None` for anything it
//! cannot interpret. Callers turn `None` into a null field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Largest integer exactly representable as an `f64`
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Nil GUID used where a project has no usable GUID
pub const NIL_GUID: &str = "00000000-0000-0000-0000-000000000000";

/// Raw scalar input
///
/// XML only ever produces text, but the coercions also accept native
/// booleans and numbers so they can be reused on already-typed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(value: &'a str) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar<'_> {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar<'_> {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar<'_> {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Integer, only when the value is a mathematical integer
pub fn int_or_null<'a>(value: impl Into<Scalar<'a>>) -> Option<i64> {
    match value.into() {
        Scalar::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        },
        Scalar::Number(number) => integral(number),
        Scalar::Bool(_) => None,
    }
}

fn integral(number: f64) -> Option<i64> {
    (number.is_finite() && number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER)
        .then_some(number as i64)
}

/// Best-effort float from the longest numeric prefix, e.g. `"12.5h"` is 12.5
pub fn float_or_null<'a>(value: impl Into<Scalar<'a>>) -> Option<f64> {
    match value.into() {
        Scalar::Text(text) => leading_float(text),
        Scalar::Number(number) => number.is_finite().then_some(number),
        Scalar::Bool(_) => None,
    }
}

fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Boolean from `true`/`false`/`1`/`0` in any case, or native values
pub fn bool_or_null<'a>(value: impl Into<Scalar<'a>>) -> Option<bool> {
    match value.into() {
        Scalar::Bool(flag) => Some(flag),
        Scalar::Number(number) if number == 1.0 => Some(true),
        Scalar::Number(number) if number == 0.0 => Some(false),
        Scalar::Number(_) => None,
        Scalar::Text(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") || text == "1" {
                Some(true)
            } else if text.eq_ignore_ascii_case("false") || text == "0" {
                Some(false)
            } else {
                None
            }
        },
    }
}

/// Point in time; timestamps without an offset are read as UTC
pub fn instant_or_null(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
}

/// Calendar date component of [`instant_or_null`]
pub fn date_or_null(text: &str) -> Option<NaiveDate> {
    instant_or_null(text).map(|instant| instant.date_naive())
}

/// Canonical 8-4-4-4-12 hexadecimal GUID, case-insensitive
pub fn is_canonical_guid(text: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let mut parts = text.split('-');
    let grouped = GROUPS.iter().all(|&len| {
        parts
            .next()
            .is_some_and(|part| part.len() == len && part.bytes().all(|b| b.is_ascii_hexdigit()))
    });
    grouped && parts.next().is_none()
}

/// GUID as provided when it is canonical
pub fn guid_or_null(text: &str) -> Option<String> {
    let text = text.trim();
    is_canonical_guid(text).then(|| text.to_string())
}

/// Same as [`guid_or_null`] after removing curly braces
pub fn braced_guid_or_null(text: &str) -> Option<String> {
    let stripped: String = text.chars().filter(|c| !matches!(c, '{' | '}')).collect();
    guid_or_null(&stripped)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_int_coercion() {
        assert_eq!(int_or_null("42"), Some(42));
        assert_eq!(int_or_null(" -7 "), Some(-7));
        assert_eq!(int_or_null("42.0"), Some(42));
        assert_eq!(int_or_null("1e3"), Some(1000));
        assert_eq!(int_or_null("42.5"), None);
        assert_eq!(int_or_null(""), None);
        assert_eq!(int_or_null("abc"), None);
        assert_eq!(int_or_null("12abc"), None);
        assert_eq!(int_or_null("NaN"), None);
        assert_eq!(int_or_null("inf"), None);
        assert_eq!(int_or_null(5.0), Some(5));
        assert_eq!(int_or_null(true), None);
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(float_or_null("3.25"), Some(3.25));
        assert_eq!(float_or_null("12.5h"), Some(12.5));
        assert_eq!(float_or_null("  -.5"), Some(-0.5));
        assert_eq!(float_or_null("5."), Some(5.0));
        assert_eq!(float_or_null("2e3x"), Some(2000.0));
        assert_eq!(float_or_null("2e"), Some(2.0));
        assert_eq!(float_or_null("."), None);
        assert_eq!(float_or_null("abc"), None);
        assert_eq!(float_or_null(""), None);
        assert_eq!(float_or_null("Infinity"), None);
        assert_eq!(float_or_null(f64::NAN), None);
        assert_eq!(float_or_null(8.0), Some(8.0));
    }

    #[test]
    fn test_bool_coercion() {
        assert_eq!(bool_or_null("TRUE"), Some(true));
        assert_eq!(bool_or_null("false"), Some(false));
        assert_eq!(bool_or_null("0"), Some(false));
        assert_eq!(bool_or_null("1"), Some(true));
        assert_eq!(bool_or_null(1i64), Some(true));
        assert_eq!(bool_or_null(0.0), Some(false));
        assert_eq!(bool_or_null(2.0), None);
        assert_eq!(bool_or_null(true), Some(true));
        assert_eq!(bool_or_null(""), None);
        assert_eq!(bool_or_null("yes"), None);
    }

    #[test]
    fn test_instant_coercion() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
        assert_eq!(instant_or_null("2024-05-06T08:00:00"), Some(expected));
        assert_eq!(instant_or_null("2024-05-06T08:00:00Z"), Some(expected));
        assert_eq!(instant_or_null("2024-05-06T10:00:00+02:00"), Some(expected));
        assert_eq!(instant_or_null("2024-05-06T08:00"), Some(expected));
        assert_eq!(
            instant_or_null("2024-05-06"),
            Some(Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap())
        );
        assert_eq!(instant_or_null("2024-13-01T00:00:00"), None);
        assert_eq!(instant_or_null("soon"), None);
        assert_eq!(instant_or_null(""), None);
    }

    #[test]
    fn test_date_coercion_truncates() {
        assert_eq!(
            date_or_null("2024-05-06T23:59:00"),
            NaiveDate::from_ymd_opt(2024, 5, 6)
        );
    }

    #[test]
    fn test_guid_validation() {
        let guid = "550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(guid_or_null(guid).as_deref(), Some(guid));
        assert_eq!(
            guid_or_null("550E8400-E29B-41D4-A716-446655440000").as_deref(),
            Some("550E8400-E29B-41D4-A716-446655440000")
        );
        assert_eq!(guid_or_null("{550e8400-e29b-41d4-a716-446655440000}"), None);
        assert_eq!(
            braced_guid_or_null("{550e8400-e29b-41d4-a716-446655440000}").as_deref(),
            Some(guid)
        );
        assert_eq!(guid_or_null("not-a-guid"), None);
        assert_eq!(guid_or_null("550e8400-e29b-41d4-a716-446655440000-00"), None);
        assert_eq!(guid_or_null("550e8400e29b41d4a716446655440000"), None);
        assert!(is_canonical_guid(NIL_GUID));
    }

    proptest! {
        #[test]
        fn prop_int_round_trips_display(n in -1_000_000_000_000i64..1_000_000_000_000i64) {
            prop_assert_eq!(int_or_null(n.to_string().as_str()), Some(n));
        }

        #[test]
        fn prop_float_never_yields_non_finite(s in "\\PC{0,16}") {
            if let Some(v) = float_or_null(s.as_str()) {
                prop_assert!(v.is_finite());
            }
        }
    }
}
