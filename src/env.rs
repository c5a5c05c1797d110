//! Environment variable source.
//!
//! Production code uses [`Env::real()`] which reads the process environment.
//! [`Env::from_vars()`] resolves against a fixed set of key-value pairs,
//! which keeps tests away from `unsafe` calls to [`std::env::set_var`] /
//! [`std::env::remove_var`].

use std::collections::HashMap;

use crate::error::ParseError;
use crate::value::FromEnvStr;

/// Environment variable reader.
///
/// Every lookup goes back to the source; nothing is cached.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn from_vars(
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Raw value of a variable, or `None` when it is not set.
    ///
    /// Non-Unicode values are converted lossily. Names the platform cannot
    /// represent (empty, containing `=` or NUL) are reported as not set.
    pub fn raw(&self, name: &str) -> Option<String> {
        match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var_os(name).map(|v| v.to_string_lossy().into_owned()),
        }
    }

    /// Read `name` as a `T`, falling back to `default`.
    ///
    /// An unset variable yields `(default, None)`. A set variable that fails
    /// to parse yields `(default, Some(err))`, so the returned value is always
    /// usable even when the error is ignored.
    pub fn lookup<T: FromEnvStr>(&self, name: &str, default: T) -> (T, Option<ParseError>) {
        let Some(raw) = self.raw(name) else {
            return (default, None);
        };
        match T::from_env_str(&raw) {
            Ok(value) => (value, None),
            Err(reason) => (default, Some(ParseError::new(name, raw, T::KIND, reason))),
        }
    }

    /// Like [`lookup`](Self::lookup), but assigns the result to `out`.
    ///
    /// `out` is written on every path, including parse failure.
    pub fn lookup_var<T: FromEnvStr>(
        &self,
        out: &mut T,
        name: &str,
        default: T,
    ) -> Result<(), ParseError> {
        let (value, err) = self.lookup(name, default);
        *out = value;
        err.map_or(Ok(()), Err)
    }
}
