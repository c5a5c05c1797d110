//! Conversion from raw environment strings into typed values.
//!
//! [`FromEnvStr`] is the single capability every accessor is built on:
//! implement it for a type and [`lookup`](crate::lookup) works for it.

use std::time::Duration;

use chrono::TimeDelta;

use crate::duration::{parse_duration, parse_std_duration};
use crate::error::{ParseFailure, ValueKind};

/// A type that can be read from the textual value of an environment variable.
pub trait FromEnvStr: Sized {
    /// Type name reported in [`ParseError`](crate::ParseError).
    const KIND: ValueKind;

    fn from_env_str(raw: &str) -> Result<Self, ParseFailure>;
}

impl FromEnvStr for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
        Ok(raw.to_string())
    }
}

impl FromEnvStr for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ParseFailure::Bool),
        }
    }
}

macro_rules! signed_from_env_str {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl FromEnvStr for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
                Ok(raw.parse::<$ty>()?)
            }
        }
    )*};
}

// Unsigned literals take no sign, not even `+`.
macro_rules! unsigned_from_env_str {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl FromEnvStr for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
                if raw.starts_with('+') {
                    return Err(ParseFailure::UnexpectedSign);
                }
                Ok(raw.parse::<$ty>()?)
            }
        }
    )*};
}

signed_from_env_str!(i32 => I32, i64 => I64);
unsigned_from_env_str!(u32 => U32, u64 => U64);

/// True when `raw` spells an infinity rather than a finite number that overflowed.
fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// `+nan` / `-nan`: only infinities may carry a sign.
fn is_signed_nan(raw: &str) -> bool {
    raw.strip_prefix(['+', '-'])
        .is_some_and(|rest| rest.eq_ignore_ascii_case("nan"))
}

macro_rules! float_from_env_str {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl FromEnvStr for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
                if is_signed_nan(raw) {
                    return Err(ParseFailure::SignedNan);
                }
                let value = raw.parse::<$ty>()?;
                if value.is_infinite() && !is_infinity_literal(raw) {
                    return Err(ParseFailure::FloatOutOfRange);
                }
                Ok(value)
            }
        }
    )*};
}

float_from_env_str!(f32 => F32, f64 => F64);

impl FromEnvStr for TimeDelta {
    const KIND: ValueKind = ValueKind::Duration;

    fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
        Ok(parse_duration(raw)?)
    }
}

impl FromEnvStr for Duration {
    const KIND: ValueKind = ValueKind::StdDuration;

    fn from_env_str(raw: &str) -> Result<Self, ParseFailure> {
        Ok(parse_std_duration(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_only_canonical_tokens() {
        for t in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(bool::from_env_str(t), Ok(true), "{t}");
        }
        for f in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(bool::from_env_str(f), Ok(false), "{f}");
        }
        for bad in ["yes", "no", "on", "tRUE", " true", "", "2"] {
            assert_eq!(bool::from_env_str(bad), Err(ParseFailure::Bool), "{bad}");
        }
    }

    #[test]
    fn signed_integers_respect_width() {
        assert_eq!(i32::from_env_str("-42"), Ok(-42));
        assert_eq!(i32::from_env_str("+42"), Ok(42));
        assert_eq!(i32::from_env_str("2147483647"), Ok(i32::MAX));
        assert!(i32::from_env_str("2147483648").is_err());
        assert_eq!(i64::from_env_str("2147483648"), Ok(2_147_483_648));
        assert!(i64::from_env_str("9223372036854775808").is_err());
        assert!(i32::from_env_str("1_000").is_err());
        assert!(i32::from_env_str(" 1").is_err());
        assert!(i32::from_env_str("0x10").is_err());
    }

    #[test]
    fn unsigned_integers_reject_any_sign() {
        assert_eq!(u32::from_env_str("4294967295"), Ok(u32::MAX));
        assert!(u32::from_env_str("4294967296").is_err());
        assert!(u32::from_env_str("-1").is_err());
        assert_eq!(u32::from_env_str("+1"), Err(ParseFailure::UnexpectedSign));
        assert_eq!(u64::from_env_str("+1"), Err(ParseFailure::UnexpectedSign));
        assert_eq!(u64::from_env_str("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn floats_reject_overflow_but_accept_infinity() {
        assert_eq!(f64::from_env_str("1.5e3"), Ok(1500.0));
        assert_eq!(f32::from_env_str("-0.25"), Ok(-0.25));
        assert_eq!(f64::from_env_str("inf"), Ok(f64::INFINITY));
        assert_eq!(f64::from_env_str("-Infinity"), Ok(f64::NEG_INFINITY));
        assert!(f64::from_env_str("NaN").is_ok_and(f64::is_nan));
        assert_eq!(f32::from_env_str("1e39"), Err(ParseFailure::FloatOutOfRange));
        assert_eq!(f64::from_env_str("1e39"), Ok(1e39));
        assert_eq!(f64::from_env_str("1e400"), Err(ParseFailure::FloatOutOfRange));
        assert!(matches!(f64::from_env_str("abc"), Err(ParseFailure::Float(_))));
    }

    #[test]
    fn nan_takes_no_sign() {
        assert!(f32::from_env_str("nan").is_ok_and(f32::is_nan));
        assert!(f64::from_env_str("NAN").is_ok_and(f64::is_nan));
        assert_eq!(f32::from_env_str("+nan"), Err(ParseFailure::SignedNan));
        assert_eq!(f64::from_env_str("-NaN"), Err(ParseFailure::SignedNan));
        assert_eq!(f64::from_env_str("+inf"), Ok(f64::INFINITY));
    }

    #[test]
    fn durations_delegate_to_literal_parser() {
        assert_eq!(
            TimeDelta::from_env_str("-1h30m"),
            Ok(TimeDelta::minutes(-90))
        );
        assert!(matches!(
            TimeDelta::from_env_str("soon"),
            Err(ParseFailure::Duration(_))
        ));
        assert_eq!(
            Duration::from_env_str("1h30m"),
            Ok(Duration::from_secs(5400))
        );
        assert_eq!(
            Duration::from_env_str("-1h30m"),
            Err(ParseFailure::Duration(crate::DurationError::Negative))
        );
    }

    #[test]
    fn strings_pass_through_untouched() {
        assert_eq!(String::from_env_str("  spaced  "), Ok("  spaced  ".to_string()));
        assert_eq!(String::from_env_str(""), Ok(String::new()));
    }
}
