//! Duration literals such as `300ms`, `-1.5h` or `1h30m`.
//!
//! Grammar: an optional sign followed by one or more `<number><unit>`
//! pairs. A number is decimal with an optional fraction (`1`, `1.5`, `.5`,
//! `1.`). Units are `ns`, `us` (also `µs` / `μs`), `ms`, `s`, `m` and `h`.
//! The bare literal `0` needs no unit. Pairs are summed, so `1h30m` is
//! ninety minutes.
//!
//! The result is a signed [`TimeDelta`] covering the full `i64` nanosecond
//! range. Reading a [`std::time::Duration`] instead goes through the same
//! parser and rejects negative values.

use chrono::TimeDelta;

use thiserror::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Largest positive total, in nanoseconds. Negative totals may reach one more.
const MAX_NANOS: u64 = i64::MAX as u64;

/// Reasons a duration literal is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration syntax")]
    Invalid,

    #[error("missing unit in duration")]
    MissingUnit,

    #[error("unknown unit {0:?} in duration (expected ns, us, µs, ms, s, m or h)")]
    UnknownUnit(String),

    #[error("duration out of range")]
    Overflow,

    #[error("negative duration cannot be represented as an unsigned duration")]
    Negative,
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC greek small letter mu
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume leading ASCII digits as an integer.
fn leading_int(s: &str) -> Result<(u64, &str), DurationError> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_NANOS + 1)
            .ok_or(DurationError::Overflow)?;
    }
    Ok((value, &s[end..]))
}

/// Consume leading ASCII digits as the fractional part of a number.
///
/// Returns the digits as an integer and the power of ten they are scaled by.
/// Digits past the precision of `u64` are dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    let mut overflowed = false;
    for b in s[..end].bytes() {
        if overflowed {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
        {
            Some(v) => {
                value = v;
                scale *= 10.0;
            }
            None => overflowed = true,
        }
    }
    (value, scale, &s[end..])
}

/// Parse a duration literal.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(if input.is_empty() {
            DurationError::Empty
        } else {
            DurationError::Invalid
        });
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(DurationError::Invalid);
        }

        let before = s.len();
        let (whole, rest) = leading_int(s)?;
        let has_whole = rest.len() != before;
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let before = rest.len();
            let (f, sc, rest) = leading_fraction(rest);
            has_fraction = rest.len() != before;
            fraction = f;
            scale = sc;
            s = rest;
        }
        if !has_whole && !has_fraction {
            return Err(DurationError::Invalid);
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit);
        }
        let (unit, rest) = s.split_at(unit_end);
        s = rest;
        let unit_ns =
            unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        if whole > (MAX_NANOS + 1) / unit_ns {
            return Err(DurationError::Overflow);
        }
        let mut value = whole * unit_ns;
        if fraction > 0 {
            // Truncates toward zero, so sub-nanosecond remainders are lost.
            value += (fraction as f64 * (unit_ns as f64 / scale)) as u64;
            if value > MAX_NANOS + 1 {
                return Err(DurationError::Overflow);
            }
        }
        total = total
            .checked_add(value)
            .filter(|t| *t <= MAX_NANOS + 1)
            .ok_or(DurationError::Overflow)?;
    }

    let nanos = if negative {
        // total <= 2^63, so this lands in i64::MIN..=0
        0_i64.wrapping_sub_unsigned(total)
    } else {
        i64::try_from(total).map_err(|_| DurationError::Overflow)?
    };
    Ok(TimeDelta::nanoseconds(nanos))
}

/// Parse a duration literal that must not be negative.
pub fn parse_std_duration(input: &str) -> Result<std::time::Duration, DurationError> {
    parse_duration(input)?
        .to_std()
        .map_err(|_| DurationError::Negative)
}
