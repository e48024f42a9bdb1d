use crate::{
    expression::ValidatedExpression,
    field::Field,
    pattern::{Moment, Pattern},
    Result,
};
use chrono::{DateTime, TimeZone};

/// Defines how the fields of a validated expression are interpreted while matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchMode {
    /// Behaviour of the reference validator: a field matches if it's `*`,
    /// or if one of its comma separated items is literally equal to the candidate's value.
    ///
    /// Numbers are compared as unpadded decimal strings, so `05`, `1-5` or `*/15` never match anything.
    /// The only exception is day of week: the candidate's day is compared with `SUN`..`SAT` abbreviations,
    /// and ranges like `MON-FRI` are expanded. A range with a start that isn't an abbreviation
    /// covers Saturday only if it ends with `SAT` (`*-SAT`), and is empty otherwise.
    /// `L`, `W` and `#` never match.
    #[default]
    Literal,
    /// Full cron semantics: numeric and mnemonic values, ranges (including open `*-V` and `V-*`, and
    /// wrapping ones like `FRI-MON`), steps, last day of month `L`, nearest weekday `W`
    /// and N-th weekday `#`. Day of week `L` means Saturday.
    ///
    /// Year `L` has no calendar meaning and is rejected.
    Calendar,
}

/// Compiled set of the field predicates of a single expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Matcher {
    minute: Predicate,
    hour: Predicate,
    month: Predicate,
    day_of_month: Option<Predicate>,
    day_of_week: Option<Predicate>,
    year: Predicate,
}

impl Matcher {
    pub(crate) fn new(expression: &ValidatedExpression, mode: MatchMode) -> Result<Self> {
        let predicate = |field: Field| Predicate::new(field, expression.field(field), mode);
        // day field with `?` is never evaluated
        let day_predicate = |field: Field| {
            if expression.field(field) == "?" {
                Ok(None)
            } else {
                predicate(field).map(Some)
            }
        };

        Ok(Self {
            minute: predicate(Field::Minute)?,
            hour: predicate(Field::Hour)?,
            day_of_month: day_predicate(Field::DayOfMonth)?,
            month: predicate(Field::Month)?,
            day_of_week: day_predicate(Field::DayOfWeek)?,
            year: predicate(Field::Year)?,
        })
    }

    /// Tests fields in order: minute, hour, month, day of month, day of week and year.
    pub(crate) fn matches<Tz: TimeZone>(&self, candidate: &DateTime<Tz>) -> bool {
        let moment = Moment::from(candidate);

        self.minute.contains(&moment)
            && self.hour.contains(&moment)
            && self.month.contains(&moment)
            && self.day_of_month.as_ref().map_or(true, |p| p.contains(&moment))
            && self.day_of_week.as_ref().map_or(true, |p| p.contains(&moment))
            && self.year.contains(&moment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Predicate {
    Literal(Field, LiteralList),
    Calendar(Pattern),
}

impl Predicate {
    fn new(field: Field, input: &str, mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::Literal => Ok(Self::Literal(field, LiteralList::new(field, input))),
            MatchMode::Calendar => Ok(Self::Calendar(Pattern::parse(field, input)?)),
        }
    }

    fn contains(&self, moment: &Moment) -> bool {
        match self {
            Predicate::Literal(Field::DayOfWeek, list) => {
                let dow = moment.dow as usize - 1;
                list.contains(Field::DAYS_OF_WEEK[dow])
            }
            Predicate::Literal(field, list) => list.contains(&moment.value(*field).to_string()),
            Predicate::Calendar(pattern) => pattern.contains(moment),
        }
    }
}

/// List of the literal tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LiteralList {
    All,
    Tokens(Vec<String>),
}

impl LiteralList {
    fn new(field: Field, input: &str) -> Self {
        if input == "*" {
            return Self::All;
        }

        let tokens = input.split(',');
        if field == Field::DayOfWeek {
            Self::Tokens(tokens.flat_map(expand_days_of_week).collect())
        } else {
            Self::Tokens(tokens.map(str::to_owned).collect())
        }
    }

    fn contains(&self, value: &str) -> bool {
        match self {
            LiteralList::All => true,
            LiteralList::Tokens(tokens) => tokens.iter().any(|token| token == value),
        }
    }
}

/// Expands `START-END` range of the day abbreviations into the list of days.
///
/// Unknown start counts from the end of the week, so `*-SAT` and `1-SAT` are `SAT` only.
/// Range with unknown end or with end before start is empty; other tokens are returned as is.
fn expand_days_of_week(token: &str) -> Vec<String> {
    let mut bounds = token.split('-');
    let (Some(start), Some(end)) = (bounds.next(), bounds.next()) else {
        return vec![token.to_owned()];
    };

    let days = &Field::DAYS_OF_WEEK;
    let position = |day: &str| days.iter().position(|&d| d == day);
    let start = position(start).unwrap_or(days.len() - 1);
    let end = position(end).map_or(0, |end| end + 1);

    if start < end {
        days[start..end].iter().map(|&d| d.to_owned()).collect()
    } else {
        vec![]
    }
}
