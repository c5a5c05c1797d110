//! Typed accessors over the process environment.
//!
//! Every type gets a pair of functions: one returning the value and one
//! (`*_var`) assigning it through a `&mut` reference. Both fall back to the
//! supplied default when the variable is unset, and also when it is set but
//! malformed, in which case the [`ParseError`] is reported alongside.
//!
//! ```no_run
//! use envor::TimeDelta;
//!
//! let (port, err) = envor::i32("PORT", 8080);
//! if let Some(err) = err {
//!     eprintln!("Warning: {err}, using {port}");
//! }
//!
//! let mut timeout = TimeDelta::zero();
//! envor::duration_var(&mut timeout, "TIMEOUT", TimeDelta::seconds(5)).ok();
//! ```

use chrono::TimeDelta;

use crate::env::Env;
use crate::error::ParseError;
use crate::value::FromEnvStr;

/// Read `key` as any [`FromEnvStr`] type, falling back to `default`.
pub fn lookup<T: FromEnvStr>(key: &str, default: T) -> (T, Option<ParseError>) {
    Env::real().lookup(key, default)
}

/// Assign `key` read as any [`FromEnvStr`] type to `out`, falling back to `default`.
pub fn lookup_var<T: FromEnvStr>(out: &mut T, key: &str, default: T) -> Result<(), ParseError> {
    Env::real().lookup_var(out, key, default)
}

/// Read `key` as a string, or `default` if it is not set.
///
/// Strings need no conversion, so there is no error case.
pub fn string(key: &str, default: impl Into<String>) -> String {
    Env::real().raw(key).unwrap_or_else(|| default.into())
}

/// Assign `key` to `out`, or `default` if it is not set.
pub fn string_var(out: &mut String, key: &str, default: impl Into<String>) {
    *out = string(key, default);
}

/// Generates the value-returning and `*_var` accessor for each type.
macro_rules! typed_accessors {
    ($($(#[$doc:meta])* $ty:ty => $name:ident, $var_name:ident;)*) => {$(
        $(#[$doc])*
        ///
        /// Returns `(default, None)` when unset and `(default, Some(err))`
        /// when the value cannot be parsed.
        pub fn $name(key: &str, default: $ty) -> ($ty, Option<ParseError>) {
            lookup(key, default)
        }

        $(#[$doc])*
        ///
        /// Assigns the result to `out` on every path, returning the parse
        /// error if there was one.
        pub fn $var_name(out: &mut $ty, key: &str, default: $ty) -> Result<(), ParseError> {
            lookup_var(out, key, default)
        }
    )*};
}

typed_accessors! {
    /// Read a boolean (`1`, `t`, `true`, `0`, `f`, `false`, ...).
    bool => bool, bool_var;
    /// Read a base-10 32-bit signed integer.
    i32 => i32, i32_var;
    /// Read a base-10 32-bit unsigned integer.
    u32 => u32, u32_var;
    /// Read a base-10 64-bit signed integer.
    i64 => i64, i64_var;
    /// Read a base-10 64-bit unsigned integer.
    u64 => u64, u64_var;
    /// Read a 32-bit float.
    f32 => f32, f32_var;
    /// Read a 64-bit float.
    f64 => f64, f64_var;
    /// Read a signed duration literal such as `250ms`, `-5s` or `1h30m`.
    TimeDelta => duration, duration_var;
}
