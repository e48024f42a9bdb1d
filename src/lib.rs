//! Validator and upcoming events generator for AWS EventBridge cron expressions.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to:
//! - validate schedule expressions in the six-field cron dialect of AWS EventBridge;
//! - generate series of timestamps which satisfy a validated expression.
//!
//! _This is not a jobs scheduler or runner._
//!
//! ## Expression format
//!
//! Expression consists of exactly six fields separated by a single space:
//!
//! | Field        | Allowed values  | Allowed special characters |
//! |--------------|-----------------|----------------------------|
//! | Minute       | 0-59            | , - * /                    |
//! | Hour         | 0-23            | , - * /                    |
//! | Day-of-month | 1-31            | , - * ? / L W              |
//! | Month        | 1-12 or JAN-DEC | , - * /                    |
//! | Day-of-week  | 1-7 or SUN-SAT  | , - * ? L #                |
//! | Year         | 1970-2199       | , - * / ? L                |
//!
//! Patterns meanings:
//! - `*` - each possible value;
//! - `,` - list of values or ranges, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`, one of the ends may be `*`: `*-15`, `10-*`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`;
//! - `L` - last day of the month or of the week;
//! - `W` - the weekday nearest to the specified day of month, i.e. `22W`;
//! - `#` - N-th day of the week in the month, i.e. `FRI#1`, `2#4`;
//! - `?` - exactly one of day-of-month and day-of-week must be `?`.
//!
//! Numeric values may have a leading zero (except day of week and year), mnemonics are upper case only.
//!
//! ## Matching modes
//!
//! How validated fields are interpreted is defined by [`MatchMode`]:
//! - [`MatchMode::Literal`] (default) reproduces behaviour of the reference validator:
//!   list items are compared with the candidate's values as plain strings,
//!   only day of week ranges like `MON-FRI` are expanded;
//! - [`MatchMode::Calendar`] implements complete cron semantics, including `L`, `W` and `#`.
//!
//! ## How to use
//!
//! ### Validation
//! ```rust
//! use aws_cron_lite::{validate, CronError, Field};
//!
//! let expression = validate("0 12 ? * MON-FRI *").unwrap();
//! assert_eq!(expression.hour(), "12");
//! assert_eq!(expression.day_of_week(), "MON-FRI");
//!
//! let error = validate("0 * ? * MON-FRI 1969").unwrap_err();
//! assert_eq!(error, CronError::FieldGrammar { field: Field::Year, value: "1969".to_owned() });
//! assert_eq!(error.to_string(), "Invalid year value '1969'.");
//! ```
//!
//! ### Upcoming events
//! ```rust
//! use aws_cron_lite::{upcoming_from, validate, MatchMode, Options, Result};
//! use chrono::DateTime;
//!
//! fn upcoming() -> Result<()> {
//!     let from = DateTime::parse_from_rfc3339("2024-01-06T00:00:00Z").unwrap();
//!
//!     // Get the next 3 timestamps starting from `from`
//!     let events = upcoming_from("0 12 ? * MON-FRI *", 3, &from)?;
//!     assert_eq!(events[0].to_rfc3339(), "2024-01-08T12:00:00+00:00");
//!
//!     // The same with full cron semantics
//!     let options = Options::new(3).mode(MatchMode::Calendar);
//!     let events = validate("0/30 9-17 ? * 2-6 *")?.upcoming_with(&from, &options)?;
//!     assert_eq!(events[2].to_rfc3339(), "2024-01-08T10:00:00+00:00");
//!
//!     Ok(())
//! }
//! # upcoming().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`ValidatedExpression`], [`Options`] and [`MatchMode`].
//! * `tz`: enables `Options::time_zone` to evaluate expression in the specified time zone.

/// Crate specific Error implementation.
pub mod error;
/// Validated expression and its methods.
pub mod expression;
/// Expression fields.
pub mod field;
mod grammar;
/// Matching modes.
pub mod matcher;
mod pattern;
/// Upcoming events lookup options and iterator.
pub mod upcoming;
mod utils;

// Re-export of public entities.
pub use error::CronError;
pub use expression::ValidatedExpression;
pub use field::Field;
pub use matcher::MatchMode;
pub use upcoming::{Occurrences, Options};

use chrono::{DateTime, Local, TimeZone};

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;

/// Validates `expression`, see [`ValidatedExpression::new`].
#[inline]
pub fn validate(expression: &str) -> Result<ValidatedExpression> {
    ValidatedExpression::new(expression)
}

/// Validates `expression` and returns the next `count` events starting from the current local time (inclusively).
pub fn upcoming(expression: &str, count: usize) -> Result<Vec<DateTime<Local>>> {
    upcoming_from(expression, count, &Local::now())
}

/// Validates `expression` and returns the next `count` events starting from `from` (inclusively).
///
/// Events are looked up in the literal matching mode with the default iteration limit,
/// use [`ValidatedExpression::upcoming_with`] to change this.
pub fn upcoming_from<Tz: TimeZone>(expression: &str, count: usize, from: &DateTime<Tz>) -> Result<Vec<DateTime<Tz>>> {
    validate(expression)?.upcoming(count, from)
}
