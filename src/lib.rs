//! envor: typed environment variables with defaults.
//!
//! One call per value: look the variable up, parse it, and fall back to the
//! default when it is unset. A value that is set but malformed also falls
//! back to the default, and the [`ParseError`] is returned next to it so the
//! caller can decide whether to warn, abort or ignore it.
//!
//! ```no_run
//! use envor::{KeyPrefix, TimeDelta};
//!
//! let (port, _) = envor::u32("PORT", 8080);
//! let (debug, _) = envor::bool("DEBUG", false);
//!
//! let app = KeyPrefix::new("APP_");
//! let name = app.string("NAME", "default");
//! let (timeout, _) = app.duration("TIMEOUT", TimeDelta::seconds(5));
//! ```

pub mod accessors;
pub mod duration;
pub mod env;
pub mod error;
pub mod prefix;
pub mod value;

pub use accessors::{
    bool, bool_var, duration, duration_var, f32, f32_var, f64, f64_var, i32, i32_var, i64,
    i64_var, lookup, lookup_var, string, string_var, u32, u32_var, u64, u64_var,
};
pub use chrono::TimeDelta;
pub use duration::{DurationError, parse_duration, parse_std_duration};
pub use env::Env;
pub use error::{ParseError, ParseFailure, ValueKind};
pub use prefix::KeyPrefix;
pub use value::FromEnvStr;
