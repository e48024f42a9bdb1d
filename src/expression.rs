use crate::{
    field::Field,
    grammar,
    matcher::{MatchMode, Matcher},
    upcoming::{Occurrences, Options},
    CronError, Result,
};
use chrono::{DateTime, TimeZone};
use std::{fmt::Display, str::FromStr};

/// Validated AWS EventBridge cron expression.
///
/// Holds the original text of each of six fields: validation confirms the grammar only,
/// fields are interpreted when a [matcher](ValidatedExpression::matches) is built.
///
/// For the expression format please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct ValidatedExpression {
    minute: String,
    hour: String,
    day_of_month: String,
    month: String,
    day_of_week: String,
    year: String,
    expression: String,
}

impl ValidatedExpression {
    /// Validates provided `expression` and constructs [`ValidatedExpression`] instance.
    ///
    /// Checks are applied in the fixed order and the first failed one is reported:
    /// - number of fields, separated by a single space, must be exactly 6;
    /// - exactly one of day-of-month and day-of-week must be `?`;
    /// - each field must match its grammar, fields are checked from minute to year.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        let expression = expression.into();
        let fields: Vec<&str> = expression.split(' ').collect();

        if fields.len() != 6 {
            log::debug!("expression {expression:?} has {} fields", fields.len());
            return Err(CronError::FieldCount {
                count: fields.len(),
                expression,
            });
        }

        let (dom, dow) = (fields[2], fields[4]);
        if (dom == "?") == (dow == "?") {
            log::debug!("expression {expression:?} has invalid day fields combination");
            return Err(CronError::DayFieldExclusivity {
                day_of_month: dom.to_owned(),
                day_of_week: dow.to_owned(),
            });
        }

        if let Some((field, value)) = Field::ALL
            .into_iter()
            .zip(fields.iter())
            .find(|(field, value)| !grammar::is_valid(*field, value))
        {
            log::debug!("expression {expression:?} has invalid {field} value {value:?}");
            return Err(CronError::FieldGrammar {
                field,
                value: (*value).to_owned(),
            });
        }

        Ok(Self {
            minute: fields[0].to_owned(),
            hour: fields[1].to_owned(),
            day_of_month: fields[2].to_owned(),
            month: fields[3].to_owned(),
            day_of_week: fields[4].to_owned(),
            year: fields[5].to_owned(),
            expression,
        })
    }

    /// Original minute field.
    #[inline]
    pub fn minute(&self) -> &str {
        &self.minute
    }

    /// Original hour field.
    #[inline]
    pub fn hour(&self) -> &str {
        &self.hour
    }

    /// Original day-of-month field.
    #[inline]
    pub fn day_of_month(&self) -> &str {
        &self.day_of_month
    }

    /// Original month field.
    #[inline]
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Original day-of-week field.
    #[inline]
    pub fn day_of_week(&self) -> &str {
        &self.day_of_week
    }

    /// Original year field.
    #[inline]
    pub fn year(&self) -> &str {
        &self.year
    }

    /// The whole expression, exactly as it was provided.
    #[inline]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Original text of the specified field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Minute => &self.minute,
            Field::Hour => &self.hour,
            Field::DayOfMonth => &self.day_of_month,
            Field::Month => &self.month,
            Field::DayOfWeek => &self.day_of_week,
            Field::Year => &self.year,
        }
    }

    /// All six fields in the order of appearance.
    pub fn fields(&self) -> [&str; 6] {
        Field::ALL.map(|field| self.field(field))
    }

    /// Returns `true` if `candidate` (with minute resolution) satisfies the expression.
    ///
    /// Seconds of the `candidate` are ignored.
    /// Returns [`CronError::UnsupportedToken`] if the expression can't be used with the `mode`.
    pub fn matches<Tz: TimeZone>(&self, candidate: &DateTime<Tz>, mode: MatchMode) -> Result<bool> {
        Ok(Matcher::new(self, mode)?.matches(candidate))
    }

    /// Returns the earliest `count` events starting from `from` (inclusively), using default [`Options`].
    #[inline]
    pub fn upcoming<Tz: TimeZone>(&self, count: usize, from: &DateTime<Tz>) -> Result<Vec<DateTime<Tz>>> {
        self.upcoming_with(from, &Options::new(count))
    }

    /// Returns the earliest `options.count` events starting from `from` (inclusively).
    ///
    /// Fails with [`CronError::IterationExceeded`] if the requested number of events can't be collected
    /// within `options.max_iterations` minute steps; events found so far are discarded.
    pub fn upcoming_with<Tz: TimeZone>(&self, from: &DateTime<Tz>, options: &Options) -> Result<Vec<DateTime<Tz>>> {
        log::debug!(
            "looking for {} occurrences of {:?} starting from {from:?}",
            options.count,
            self.expression
        );

        let mut events = Vec::new();
        if options.count == 0 {
            return Ok(events);
        }

        let mut occurrences = self.iter(from, options)?;
        events.extend(occurrences.by_ref().take(options.count));

        if events.len() < options.count {
            log::debug!(
                "gave up on {:?} after {} steps with {} occurrences",
                self.expression,
                occurrences.steps(),
                events.len()
            );
            return Err(CronError::IterationExceeded {
                requested: options.count,
                found: events.len(),
                limit: options.max_iterations,
            });
        }

        log::debug!("found {} occurrences in {} steps", events.len(), occurrences.steps());
        Ok(events)
    }

    /// Returns iterator of events starting from `from` (inclusively).
    ///
    /// Iterator ends when `options.max_iterations` minute steps are spent; `options.count` isn't used.
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, from: &DateTime<Tz>, options: &Options) -> Result<Occurrences<Tz>> {
        Ok(Occurrences::new(Matcher::new(self, options.mode)?, from, options))
    }
}

impl From<ValidatedExpression> for String {
    fn from(value: ValidatedExpression) -> Self {
        value.expression
    }
}

impl From<&ValidatedExpression> for String {
    fn from(value: &ValidatedExpression) -> Self {
        value.expression.clone()
    }
}

impl TryFrom<String> for ValidatedExpression {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for ValidatedExpression {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ValidatedExpression {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for ValidatedExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for ValidatedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}
