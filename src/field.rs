use crate::utils::{self, PatternValueType};
use std::fmt::Display;

/// Minimum valid year.
pub const MIN_YEAR: u16 = 1970;
/// Maximum valid year.
pub const MAX_YEAR: u16 = 2199;

/// One of the six fields of the expression, in the order they appear in the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Field {
    /// Minutes, `0-59`.
    Minute,
    /// Hours, `0-23`.
    Hour,
    /// Day of month, `1-31`.
    DayOfMonth,
    /// Month, `1-12` or `JAN-DEC`.
    Month,
    /// Day of week, `1-7` or `SUN-SAT`.
    DayOfWeek,
    /// Year, `1970-2199`.
    Year,
}

impl Field {
    /// All fields in the validation order.
    pub const ALL: [Field; 6] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
        Field::Year,
    ];

    pub(crate) const DAYS_OF_WEEK: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    pub(crate) const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// Human-readable name of the field, as it's used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day-of-month",
            Field::Month => "month",
            Field::DayOfWeek => "day-of-week",
            Field::Year => "year",
        }
    }

    /// Inclusive bounds of the numeric values.
    pub(crate) fn min_max(&self) -> (PatternValueType, PatternValueType) {
        match self {
            Field::Minute => (0, 59),
            Field::Hour => (0, 23),
            Field::DayOfMonth => (1, 31),
            Field::Month => (1, 12),
            Field::DayOfWeek => (1, 7),
            Field::Year => (MIN_YEAR, MAX_YEAR),
        }
    }

    /// Maximum count of digits in the numeric value, leading zero is counted.
    fn max_digits(&self) -> usize {
        match self {
            Field::DayOfWeek => 1,
            Field::Year => 4,
            _ => 2,
        }
    }

    fn mnemonics(&self) -> &'static [&'static str] {
        match self {
            Field::Month => &Self::MONTHS,
            Field::DayOfWeek => &Self::DAYS_OF_WEEK,
            _ => &[],
        }
    }

    /// Converts single value (number or mnemonic) into its numeric representation.
    ///
    /// Mnemonics are case-sensitive and have the same numbering as digits:
    /// `JAN` is `1`, `SUN` is `1`.
    pub(crate) fn parse(&self, input: &str) -> Option<PatternValueType> {
        let (min, max) = self.min_max();
        if input.len() <= self.max_digits() {
            if let Some(value) = utils::parse_digital_value(input, min, max) {
                return Some(value);
            }
        }

        utils::parse_string_value(input, self.mnemonics()).map(|v| v + 1)
    }

    /// Returns `true` if `input` is a single valid value of the field.
    #[inline]
    pub(crate) fn is_value(&self, input: &str) -> bool {
        self.parse(input).is_some()
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
