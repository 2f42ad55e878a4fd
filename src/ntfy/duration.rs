//! Canonical duration strings
//!
//! Delays travel to the server as text such as `30s`, `1.5ms` or `1h30m0s`.
//! [`format_duration`] produces that form and [`parse_duration`] reads it back.

use std::time::Duration;
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Error returned when a duration string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("duration '{0}' is out of range")]
    Overflow(String),
}

/// Render a duration in canonical form
///
/// Zero renders as `0s`. Durations under one second use the largest of
/// `ns`, `µs` or `ms` that keeps the integer part non-zero; everything else
/// renders as hours, minutes and (possibly fractional) seconds, leading zero
/// units dropped.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC {
        let (unit, precision) = if nanos < NANOS_PER_MICRO {
            ("ns", 0)
        } else if nanos < NANOS_PER_MILLI {
            ("µs", 3)
        } else {
            ("ms", 6)
        };
        let (whole, fraction) = split_fraction(nanos, precision);
        return format!("{whole}{fraction}{unit}");
    }

    let (total_secs, fraction) = split_fraction(nanos, 9);
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    if total_mins == 0 {
        return format!("{secs}{fraction}s");
    }

    let mins = total_mins % 60;
    let hours = total_mins / 60;
    if hours == 0 {
        format!("{mins}m{secs}{fraction}s")
    } else {
        format!("{hours}h{mins}m{secs}{fraction}s")
    }
}

/// Split `value` into its integer part and a `.ddd` suffix at `precision`
/// decimal places, trailing zeros removed. The suffix is empty when the
/// fractional part is zero.
fn split_fraction(value: u128, precision: u32) -> (u128, String) {
    let scale = 10u128.pow(precision);
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return (whole, String::new());
    }
    let digits = format!("{:0width$}", fraction, width = precision as usize);
    (whole, format!(".{}", digits.trim_end_matches('0')))
}

/// Parse a canonical duration string
///
/// Accepts one or more `<number><unit>` terms, e.g. `90s`, `1h30m`, `1.5ms`.
/// Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. A bare
/// `0` is also accepted.
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseDurationError::Empty);
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let overflow = || ParseDurationError::Overflow(s.to_string());
    let mut rest = s;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(ParseDurationError::Invalid(s.to_string()));
        }

        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => NANOS_PER_MIN,
            "h" => NANOS_PER_HOUR,
            "" => return Err(ParseDurationError::MissingUnit(s.to_string())),
            other => {
                return Err(ParseDurationError::UnknownUnit {
                    unit: other.to_string(),
                    input: s.to_string(),
                })
            }
        };

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        total = whole
            .checked_mul(scale)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(overflow)?;

        // Digits past nanosecond resolution cannot change the result
        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for digit in fraction.bytes().take(20) {
            numerator = numerator * 10 + u128::from(digit - b'0');
            denominator *= 10;
        }
        total = total
            .checked_add(numerator * scale / denominator)
            .ok_or_else(overflow)?;

        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}
