use crate::{
    field::Field,
    utils::{self, PatternValueType},
    CronError, Result,
};
use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Calendar values of the single candidate instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Moment {
    pub(crate) minute: PatternValueType,
    pub(crate) hour: PatternValueType,
    pub(crate) day: PatternValueType,
    pub(crate) month: PatternValueType,
    /// `1` is Sunday.
    pub(crate) dow: PatternValueType,
    pub(crate) year: PatternValueType,
}

impl Moment {
    pub(crate) fn value(&self, field: Field) -> PatternValueType {
        match field {
            Field::Minute => self.minute,
            Field::Hour => self.hour,
            Field::DayOfMonth => self.day,
            Field::Month => self.month,
            Field::DayOfWeek => self.dow,
            Field::Year => self.year,
        }
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Moment {
    fn from(value: &DateTime<Tz>) -> Self {
        Self {
            minute: value.minute() as PatternValueType,
            hour: value.hour() as PatternValueType,
            day: value.day() as PatternValueType,
            month: value.month() as PatternValueType,
            dow: utils::weekday_number(value),
            // years before 0 or after 65535 never match since they're out of the valid range anyway
            year: PatternValueType::try_from(value.year()).unwrap_or(0),
        }
    }
}

/// Field pattern with full calendar semantics: ranges, steps, aliases, `L`, `W` and `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Pattern {
    field: Field,
    pattern: PatternItem,
}

impl Pattern {
    /// Parses text of the already validated field.
    ///
    /// Returns [`CronError::UnsupportedToken`] for the syntactically valid tokens without calendar meaning.
    pub(crate) fn parse(field: Field, input: &str) -> Result<Self> {
        let pattern = match input {
            "*" | "?" => PatternItem::All,
            "L" => match field {
                Field::DayOfMonth => PatternItem::LastDom,
                // last day of the week
                Field::DayOfWeek => PatternItem::Particular(7),
                _ => {
                    return Err(CronError::UnsupportedToken {
                        field,
                        token: input.to_owned(),
                    })
                }
            },
            _ if field == Field::DayOfMonth && input.ends_with('W') => {
                PatternItem::Weekday(parse_value(field, input.trim_end_matches('W'))?)
            }
            _ if field == Field::DayOfWeek && input.contains('#') => {
                let (dow, nth) = input.split_once('#').ok_or_else(|| grammar_error(field, input))?;
                let nth = utils::parse_digital_value(nth, 1, 5).ok_or_else(|| grammar_error(field, input))?;
                PatternItem::Sharp(parse_value(field, dow)?, nth)
            }
            _ if input.contains('/') => {
                let (base, step) = input.split_once('/').ok_or_else(|| grammar_error(field, input))?;
                let base = if base == "*" {
                    field.min_max().0
                } else {
                    parse_value(field, base)?
                };
                // steps longer than the type are equal to "never repeat"
                let step = if step.bytes().all(|b| b.is_ascii_digit()) {
                    step.parse::<PatternValueType>().unwrap_or(PatternValueType::MAX)
                } else {
                    0
                };
                if step == 0 {
                    return Err(grammar_error(field, input));
                }
                PatternItem::RepeatingValue(base, step)
            }
            _ => {
                let mut items = input
                    .split(',')
                    .map(|item| parse_range(field, item))
                    .collect::<Result<Vec<_>>>()?;
                if items.len() > 1 {
                    PatternItem::List(items)
                } else {
                    items.pop().ok_or_else(|| grammar_error(field, input))?
                }
            }
        };

        Ok(Self { field, pattern })
    }

    /// Returns `true` if the field's value of the `moment` belongs to the pattern.
    pub(crate) fn contains(&self, moment: &Moment) -> bool {
        self.pattern.contains(moment.value(self.field), moment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PatternItem {
    All,
    Particular(PatternValueType),
    List(Vec<PatternItem>),
    // start-finish, wraps over the field's bounds if start > finish
    Range(PatternValueType, PatternValueType),
    // start/step
    RepeatingValue(PatternValueType, PatternValueType),
    LastDom,
    // nearest weekday to the day of month
    Weekday(PatternValueType),
    // weekday#nth
    Sharp(PatternValueType, PatternValueType),
}

impl PatternItem {
    fn contains(&self, value: PatternValueType, moment: &Moment) -> bool {
        match self {
            PatternItem::All => true,
            PatternItem::Particular(expected) => value == *expected,
            PatternItem::List(items) => items.iter().any(|item| item.contains(value, moment)),
            PatternItem::Range(start, end) if start <= end => (*start..=*end).contains(&value),
            PatternItem::Range(start, end) => value >= *start || value <= *end,
            PatternItem::RepeatingValue(start, step) => value >= *start && (value - start) % step == 0,
            PatternItem::LastDom => utils::days_in_month(moment.year, moment.month) == Some(moment.day),
            PatternItem::Weekday(dom) => utils::nearest_weekday(moment.year, moment.month, *dom) == Some(moment.day),
            PatternItem::Sharp(dow, nth) => utils::nth_dow(moment.year, moment.month, *dow, *nth) == Some(moment.day),
        }
    }
}

fn parse_range(field: Field, input: &str) -> Result<PatternItem> {
    let (min, max) = field.min_max();
    let item = match input.split_once('-') {
        Some(("*", end)) => PatternItem::Range(min, parse_value(field, end)?),
        Some((start, "*")) => PatternItem::Range(parse_value(field, start)?, max),
        Some((start, end)) => PatternItem::Range(parse_value(field, start)?, parse_value(field, end)?),
        None => PatternItem::Particular(parse_value(field, input)?),
    };

    Ok(item)
}

fn parse_value(field: Field, input: &str) -> Result<PatternValueType> {
    field.parse(input).ok_or_else(|| grammar_error(field, input))
}

fn grammar_error(field: Field, input: &str) -> CronError {
    CronError::FieldGrammar {
        field,
        value: input.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    fn moment(date: &str, hour: u32, minute: u32) -> Moment {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc();
        Moment::from(&date)
    }

    #[test]
    fn test_moment_from_datetime() {
        let date = DateTime::parse_from_rfc3339("2024-02-29T13:45:10+02:00").unwrap();
        assert_eq!(
            Moment::from(&date),
            Moment {
                minute: 45,
                hour: 13,
                day: 29,
                month: 2,
                dow: 5,
                year: 2024
            }
        );
        assert_eq!(Moment::from(&date.with_timezone(&Utc)).hour, 11);
    }

    #[rstest]
    #[case(Field::Minute, "*", PatternItem::All)]
    #[case(Field::Minute, "05", PatternItem::Particular(5))]
    #[case(Field::Minute, "*/15", PatternItem::RepeatingValue(0, 15))]
    #[case(Field::Minute, "10/007", PatternItem::RepeatingValue(10, 7))]
    #[case(Field::Minute, "*/99999999", PatternItem::RepeatingValue(0, PatternValueType::MAX))]
    #[case(Field::Hour, "*-5", PatternItem::Range(0, 5))]
    #[case(Field::Hour, "20-*", PatternItem::Range(20, 23))]
    #[case(Field::Hour, "22-2", PatternItem::Range(22, 2))]
    #[case(Field::DayOfMonth, "*/2", PatternItem::RepeatingValue(1, 2))]
    #[case(Field::DayOfMonth, "L", PatternItem::LastDom)]
    #[case(Field::DayOfMonth, "15W", PatternItem::Weekday(15))]
    #[case(Field::Month, "JAN-MAR", PatternItem::Range(1, 3))]
    #[case(Field::Month, "JUN,9,DEC", PatternItem::List(vec![
        PatternItem::Particular(6),
        PatternItem::Particular(9),
        PatternItem::Particular(12),
    ]))]
    #[case(Field::DayOfWeek, "MON-FRI", PatternItem::Range(2, 6))]
    #[case(Field::DayOfWeek, "L", PatternItem::Particular(7))]
    #[case(Field::DayOfWeek, "FRI#3", PatternItem::Sharp(6, 3))]
    #[case(Field::Year, "?", PatternItem::All)]
    #[case(Field::Year, "*/4", PatternItem::RepeatingValue(1970, 4))]
    fn test_pattern_parse(#[case] field: Field, #[case] input: &str, #[case] expected: PatternItem) {
        let pattern = Pattern::parse(field, input).unwrap();
        assert_eq!(pattern.pattern, expected, "field = {field}, input = {input}");
    }

    #[rstest]
    #[case(Field::Year, "L")]
    #[case(Field::Minute, "L")]
    fn test_pattern_parse_unsupported(#[case] field: Field, #[case] input: &str) {
        assert_eq!(
            Pattern::parse(field, input),
            Err(CronError::UnsupportedToken {
                field,
                token: input.to_owned()
            })
        );
    }

    #[rstest]
    #[case(Field::Minute, "*/15", "2024-01-01", 0, 45, true)]
    #[case(Field::Minute, "*/15", "2024-01-01", 0, 46, false)]
    #[case(Field::Minute, "5/20", "2024-01-01", 0, 45, true)]
    #[case(Field::Minute, "5/20", "2024-01-01", 0, 0, false)]
    #[case(Field::Minute, "1-5,7", "2024-01-01", 0, 7, true)]
    #[case(Field::Minute, "1-5,7", "2024-01-01", 0, 6, false)]
    #[case(Field::Hour, "22-2", "2024-01-01", 23, 0, true)]
    #[case(Field::Hour, "22-2", "2024-01-01", 1, 0, true)]
    #[case(Field::Hour, "22-2", "2024-01-01", 12, 0, false)]
    #[case(Field::DayOfMonth, "L", "2024-02-29", 0, 0, true)]
    #[case(Field::DayOfMonth, "L", "2023-02-28", 0, 0, true)]
    #[case(Field::DayOfMonth, "L", "2024-02-28", 0, 0, false)]
    #[case(Field::DayOfMonth, "6W", "2024-01-05", 0, 0, true)] // Saturday -> Friday
    #[case(Field::DayOfMonth, "6W", "2024-01-06", 0, 0, false)]
    #[case(Field::DayOfMonth, "31W", "2024-04-30", 0, 0, false)]
    #[case(Field::Month, "FEB", "2024-02-10", 0, 0, true)]
    #[case(Field::Month, "*/3", "2024-10-10", 0, 0, true)]
    #[case(Field::Month, "*/3", "2024-11-10", 0, 0, false)]
    #[case(Field::DayOfWeek, "MON-FRI", "2024-01-05", 0, 0, true)]
    #[case(Field::DayOfWeek, "MON-FRI", "2024-01-06", 0, 0, false)]
    #[case(Field::DayOfWeek, "FRI-MON", "2024-01-07", 0, 0, true)]
    #[case(Field::DayOfWeek, "FRI-MON", "2024-01-03", 0, 0, false)]
    #[case(Field::DayOfWeek, "2", "2024-01-01", 0, 0, true)]
    #[case(Field::DayOfWeek, "L", "2024-01-06", 0, 0, true)]
    #[case(Field::DayOfWeek, "MON#1", "2024-01-01", 0, 0, true)]
    #[case(Field::DayOfWeek, "MON#2", "2024-01-01", 0, 0, false)]
    #[case(Field::DayOfWeek, "TUE#5", "2024-01-30", 0, 0, true)]
    #[case(Field::Year, "2020-2030", "2024-01-01", 0, 0, true)]
    #[case(Field::Year, "*/2", "2024-01-01", 0, 0, true)]
    #[case(Field::Year, "*/2", "2025-01-01", 0, 0, false)]
    fn test_pattern_contains(
        #[case] field: Field,
        #[case] input: &str,
        #[case] date: &str,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: bool,
    ) {
        let pattern = Pattern::parse(field, input).unwrap();
        assert_eq!(
            pattern.contains(&moment(date, hour, minute)),
            expected,
            "field = {field}, input = {input}, date = {date} {hour:02}:{minute:02}"
        );
    }
}
