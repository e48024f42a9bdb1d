use crate::{matcher::Matcher, MatchMode};
use chrono::{DateTime, TimeDelta, TimeZone, Timelike};

/// Default number of events to look up.
pub const DEFAULT_COUNT: usize = 10;
/// Default limit of minute steps: two leap years.
pub const DEFAULT_MAX_ITERATIONS: usize = 2 * 366 * 24 * 60;

/// Parameters of the upcoming events lookup.
///
/// ```rust
/// use aws_cron_lite::{MatchMode, Options};
///
/// let options = Options::new(5).mode(MatchMode::Calendar).max_iterations(60 * 24);
/// assert_eq!(options.count, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Number of events to collect.
    pub count: usize,
    /// How fields are interpreted.
    pub mode: MatchMode,
    /// Maximum number of minute steps (tested candidates) before the lookup gives up.
    pub max_iterations: usize,
    /// Time zone to evaluate candidates in, instead of the time zone of the starting point.
    #[cfg(feature = "tz")]
    pub time_zone: Option<chrono_tz::Tz>,
}

impl Options {
    /// Constructs default options to collect `count` events.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets matching mode.
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the limit of minute steps.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the time zone which is used to evaluate candidates;
    /// returned events are converted back to the time zone of the starting point.
    #[cfg(feature = "tz")]
    pub fn time_zone(mut self, time_zone: chrono_tz::Tz) -> Self {
        self.time_zone = Some(time_zone);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            mode: MatchMode::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            #[cfg(feature = "tz")]
            time_zone: None,
        }
    }
}

/// Iterator over events of the expression, created by [`ValidatedExpression::iter`](crate::ValidatedExpression::iter).
///
/// Walks minute by minute starting from the whole minute of the starting point,
/// and stops when the steps limit is reached.
#[derive(Debug, Clone)]
pub struct Occurrences<Tz: TimeZone> {
    matcher: Matcher,
    next: Option<DateTime<Tz>>,
    steps: usize,
    max_steps: usize,
    #[cfg(feature = "tz")]
    time_zone: Option<chrono_tz::Tz>,
}

impl<Tz: TimeZone> Occurrences<Tz> {
    pub(crate) fn new(matcher: Matcher, from: &DateTime<Tz>, options: &Options) -> Self {
        Self {
            matcher,
            next: truncate_to_minute(from),
            steps: 0,
            max_steps: options.max_iterations,
            #[cfg(feature = "tz")]
            time_zone: options.time_zone,
        }
    }

    /// Number of candidates tested so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[cfg(not(feature = "tz"))]
    #[inline]
    fn is_match(&self, candidate: &DateTime<Tz>) -> bool {
        self.matcher.matches(candidate)
    }

    #[cfg(feature = "tz")]
    fn is_match(&self, candidate: &DateTime<Tz>) -> bool {
        if let Some(time_zone) = &self.time_zone {
            self.matcher.matches(&candidate.with_timezone(time_zone))
        } else {
            self.matcher.matches(candidate)
        }
    }
}

impl<Tz: TimeZone> Iterator for Occurrences<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.steps < self.max_steps {
            let current = self.next.take()?;
            self.steps += 1;
            self.next = current.clone().checked_add_signed(TimeDelta::minutes(1));

            if self.is_match(&current) {
                log::trace!("occurrence {current:?} found at step {}", self.steps);
                return Some(current);
            }
        }

        None
    }
}

/// Drops seconds and fractions of the second.
fn truncate_to_minute<Tz: TimeZone>(value: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let delta = TimeDelta::seconds(value.second() as i64) + TimeDelta::nanoseconds(value.nanosecond() as i64);
    value.clone().checked_sub_signed(delta)
}
