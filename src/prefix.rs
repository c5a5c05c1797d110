//! Prefixed lookups.
//!
//! [`KeyPrefix`] namespaces a group of variables, e.g. everything under
//! `APP_`, without the caller concatenating names by hand.

use std::fmt;

use chrono::TimeDelta;

use crate::accessors;
use crate::env::Env;
use crate::error::ParseError;
use crate::value::FromEnvStr;

/// A key prefix prepended to every lookup.
///
/// The prefix is used verbatim: no separator is inserted, so
/// `KeyPrefix::new("APP").compose("NAME")` is `"APPNAME"`. Include the
/// underscore in the prefix (or the key) if you want one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPrefix {
    prefix: String,
}

impl KeyPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The current prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replace the prefix for all subsequent lookups.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// `prefix + key`, with nothing in between.
    pub fn compose(&self, key: &str) -> String {
        let mut composed = String::with_capacity(self.prefix.len() + key.len());
        composed.push_str(&self.prefix);
        composed.push_str(key);
        composed
    }

    /// Read the prefixed `key` as any [`FromEnvStr`] type.
    pub fn lookup<T: FromEnvStr>(&self, key: &str, default: T) -> (T, Option<ParseError>) {
        accessors::lookup(&self.compose(key), default)
    }

    /// Assign the prefixed `key` read as any [`FromEnvStr`] type to `out`.
    pub fn lookup_var<T: FromEnvStr>(
        &self,
        out: &mut T,
        key: &str,
        default: T,
    ) -> Result<(), ParseError> {
        accessors::lookup_var(out, &self.compose(key), default)
    }

    /// [`lookup`](Self::lookup) against an explicit [`Env`].
    pub fn lookup_in<T: FromEnvStr>(
        &self,
        env: &Env,
        key: &str,
        default: T,
    ) -> (T, Option<ParseError>) {
        env.lookup(&self.compose(key), default)
    }

    /// [`lookup_var`](Self::lookup_var) against an explicit [`Env`].
    pub fn lookup_var_in<T: FromEnvStr>(
        &self,
        env: &Env,
        out: &mut T,
        key: &str,
        default: T,
    ) -> Result<(), ParseError> {
        env.lookup_var(out, &self.compose(key), default)
    }

    /// See [`accessors::string`].
    pub fn string(&self, key: &str, default: impl Into<String>) -> String {
        accessors::string(&self.compose(key), default)
    }

    /// See [`accessors::string_var`].
    pub fn string_var(&self, out: &mut String, key: &str, default: impl Into<String>) {
        accessors::string_var(out, &self.compose(key), default);
    }
}

/// Generates prefixed forwarding methods for each typed accessor.
macro_rules! prefixed_accessors {
    ($($ty:ty => $name:ident, $var_name:ident;)*) => {
        impl KeyPrefix {$(
            #[doc = concat!("See [`accessors::", stringify!($name), "`].")]
            pub fn $name(&self, key: &str, default: $ty) -> ($ty, Option<ParseError>) {
                accessors::$name(&self.compose(key), default)
            }

            #[doc = concat!("See [`accessors::", stringify!($var_name), "`].")]
            pub fn $var_name(
                &self,
                out: &mut $ty,
                key: &str,
                default: $ty,
            ) -> Result<(), ParseError> {
                accessors::$var_name(out, &self.compose(key), default)
            }
        )*}
    };
}

prefixed_accessors! {
    bool => bool, bool_var;
    i32 => i32, i32_var;
    u32 => u32, u32_var;
    i64 => i64, i64_var;
    u64 => u64, u64_var;
    f32 => f32, f32_var;
    f64 => f64, f64_var;
    TimeDelta => duration, duration_var;
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

impl From<&str> for KeyPrefix {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

impl From<String> for KeyPrefix {
    fn from(prefix: String) -> Self {
        Self::new(prefix)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ValueKind;

    #[test]
    fn compose_is_plain_concatenation() {
        let p = KeyPrefix::new("APP_");
        assert_eq!(p.compose("NAME"), "APP_NAME");
        assert_eq!(KeyPrefix::new("APP").compose("NAME"), "APPNAME");
        assert_eq!(KeyPrefix::new("").compose("NAME"), "NAME");
        assert_eq!(p.compose(""), "APP_");
        assert_eq!(KeyPrefix::default().compose(""), "");
    }

    #[test]
    fn prefix_is_kept_verbatim() {
        let p = KeyPrefix::new("  app. ");
        assert_eq!(p.prefix(), "  app. ");
        assert_eq!(p.to_string(), "  app. ");
    }

    #[test]
    fn set_prefix_affects_later_lookups() {
        let env = Env::from_vars([("A_PORT", "1"), ("B_PORT", "2")]);
        let mut p = KeyPrefix::from("A_");
        assert_eq!(p.lookup_in(&env, "PORT", 0_u32), (1, None));

        p.set_prefix("B_");
        assert_eq!(p.prefix(), "B_");
        assert_eq!(p.lookup_in(&env, "PORT", 0_u32), (2, None));

        p.set_prefix(String::from("C_"));
        assert_eq!(p.lookup_in(&env, "PORT", 0_u32), (0, None));
    }

    #[test]
    fn prefixed_lookup_matches_composed_key() {
        let env = Env::from_vars([("APP_NAME", "svc"), ("APP_RATE", "fast")]);
        let p = KeyPrefix::new("APP_");

        assert_eq!(
            p.lookup_in(&env, "NAME", "default".to_string()),
            env.lookup(&p.compose("NAME"), "default".to_string())
        );

        let (rate, err) = p.lookup_in(&env, "RATE", 1.5_f64);
        assert_eq!(rate, 1.5);
        let err = err.expect("non-numeric rate should fail");
        assert_eq!(err.key, "APP_RATE");
        assert_eq!(err.kind, ValueKind::F64);
    }

    #[test]
    fn prefixed_lookup_var_writes_default_on_failure() {
        let env = Env::from_vars([("APP_TIMEOUT", "forever")]);
        let p = KeyPrefix::new("APP_");

        let mut timeout = Duration::from_secs(1);
        let default = Duration::from_secs(5);
        let err = p
            .lookup_var_in(&env, &mut timeout, "TIMEOUT", default)
            .unwrap_err();
        assert_eq!(timeout, default);
        assert_eq!(err.key, "APP_TIMEOUT");
    }

    #[test]
    fn typed_methods_fall_back_for_unset_keys() {
        let p = KeyPrefix::new("ENVOR_PREFIX_UNIT_UNSET_");
        assert_eq!(p.string("NAME", "svc"), "svc");
        assert_eq!(p.bool("DEBUG", false), (false, None));
        assert_eq!(p.u64("LIMIT", 10), (10, None));
        assert_eq!(
            p.duration("TIMEOUT", TimeDelta::seconds(-1)),
            (TimeDelta::seconds(-1), None)
        );

        let mut workers = 0;
        assert!(p.u32_var(&mut workers, "WORKERS", 8).is_ok());
        assert_eq!(workers, 8);
    }
}
