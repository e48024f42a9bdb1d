use crate::field::Field;
use thiserror::Error;

/// Crate specific Errors implementation.
///
/// Messages of the validation variants are kept identical to the ones produced by the
/// reference validator, so they may be compared verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum CronError {
    /// Expression doesn't consist of exactly six space separated fields.
    #[error("Incorrect number of values in '{expression}'. 6 required, {count} provided.")]
    FieldCount {
        /// Expression as it was provided.
        expression: String,
        /// Number of fields found.
        count: usize,
    },
    /// Neither or both of day-of-month and day-of-week are `?`.
    #[error(
        "Invalid combination of day-of-month '{day_of_month}' and day-of-week '{day_of_week}'. One must be a question mark (?)"
    )]
    DayFieldExclusivity {
        /// Raw day-of-month field.
        day_of_month: String,
        /// Raw day-of-week field.
        day_of_week: String,
    },
    /// Field value doesn't conform to the field grammar.
    #[error("Invalid {field} value '{value}'.")]
    FieldGrammar {
        /// Offending field.
        field: Field,
        /// Raw field value.
        value: String,
    },
    /// Enumeration ran out of steps before collecting requested number of events.
    #[error("Max iteration exceeded: found {found} of {requested} occurrences within {limit} steps")]
    IterationExceeded {
        /// Number of requested events.
        requested: usize,
        /// Number of events found before the limit was hit.
        found: usize,
        /// Iteration limit in effect.
        limit: usize,
    },
    /// Token is syntactically valid but has no calendar meaning.
    #[error("Unsupported {field} token '{token}' for calendar matching.")]
    UnsupportedToken {
        /// Field holding the token.
        field: Field,
        /// The token itself.
        token: String,
    },
}
