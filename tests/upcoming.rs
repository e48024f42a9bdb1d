use aws_cron_lite::{upcoming, upcoming_from, validate, CronError, MatchMode, Options, Result};
use chrono::{DateTime, Datelike, Local, Timelike};
use rstest::rstest;

#[test]
fn upcoming_noon() -> Result<()> {
    let from = DateTime::parse_from_rfc3339("2024-03-10T08:15:42Z").unwrap();
    let events = upcoming_from("0 12 ? * * *", 3, &from)?;

    assert_eq!(
        events.iter().map(|t| t.to_rfc3339()).collect::<Vec<_>>(),
        vec![
            "2024-03-10T12:00:00+00:00",
            "2024-03-11T12:00:00+00:00",
            "2024-03-12T12:00:00+00:00",
        ]
    );

    Ok(())
}

#[test]
fn upcoming_from_now() -> Result<()> {
    let now = Local::now();
    let events = upcoming("0 12 ? * * *", 3)?;

    assert_eq!(events.len(), 3);
    for event in &events {
        assert_eq!((event.hour(), event.minute(), event.second()), (12, 0, 0));
        assert!(*event > now - chrono::Duration::minutes(1));
    }

    Ok(())
}

#[test]
fn upcoming_includes_starting_minute() -> Result<()> {
    let from = DateTime::parse_from_rfc3339("2024-03-10T12:00:30Z").unwrap();
    let events = upcoming_from("0 12 ? * * *", 1, &from)?;
    assert_eq!(events[0].to_rfc3339(), "2024-03-10T12:00:00+00:00");

    Ok(())
}

#[rstest]
#[case("* * ? * * *", 100)]
#[case("0,15,30,45 * ? * * *", 50)]
#[case("0 12 ? * MON-FRI *", 20)]
#[case("0 8 1 * ? *", 12)]
#[case("30 6 ? 6 SAT,SUN *", 10)]
fn upcoming_is_strictly_increasing(#[case] expression: &str, #[case] count: usize) {
    let from = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
    let events = upcoming_from(expression, count, &from).unwrap();

    assert_eq!(events.len(), count);
    assert!(events[0] >= from);
    assert!(
        events.windows(2).all(|w| w[0] < w[1]),
        "expression = {expression}, events = {events:?}"
    );
}

#[test]
fn upcoming_weekdays() -> Result<()> {
    // Saturday
    let from = DateTime::parse_from_rfc3339("2024-01-06T00:00:00Z").unwrap();
    let events = upcoming_from("0 12 ? * MON-FRI *", 6, &from)?;

    assert_eq!(
        events.iter().map(|t| t.weekday().to_string()).collect::<Vec<_>>(),
        vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Mon"]
    );

    Ok(())
}

#[test]
fn upcoming_open_range_ending_with_saturday() -> Result<()> {
    // Monday
    let from = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
    let events = upcoming_from("0 12 ? * *-SAT *", 2, &from)?;

    assert_eq!(
        events.iter().map(|t| t.to_rfc3339()).collect::<Vec<_>>(),
        vec!["2024-01-06T12:00:00+00:00", "2024-01-13T12:00:00+00:00"]
    );

    Ok(())
}

#[test]
fn upcoming_validation_error() {
    let from = DateTime::parse_from_rfc3339("2024-01-06T00:00:00Z").unwrap();
    assert_eq!(
        upcoming_from("0 * * * MON-FRI *", 1, &from),
        Err(CronError::DayFieldExclusivity {
            day_of_month: "*".to_owned(),
            day_of_week: "MON-FRI".to_owned()
        })
    );
}

#[rstest]
// ranges and steps are never literally equal to the candidate's values
#[case("0-5 12 ? * * *")]
#[case("*/15 * ? * * *")]
#[case("0 12 ? JAN * *")]
#[case("0 12 L * ? *")]
#[case("0 12 ? * * 2000")]
fn upcoming_literal_unsatisfiable(#[case] expression: &str) {
    let from = DateTime::parse_from_rfc3339("2024-01-06T00:00:00Z").unwrap();
    let options = Options::new(1).max_iterations(60 * 24 * 31);

    assert_eq!(
        validate(expression).unwrap().upcoming_with(&from, &options),
        Err(CronError::IterationExceeded {
            requested: 1,
            found: 0,
            limit: 60 * 24 * 31
        })
    );
}

#[rstest]
#[case("*/15 * ? * * *", "2024-01-01T00:01:00Z", &["2024-01-01T00:15:00+00:00", "2024-01-01T00:30:00+00:00", "2024-01-01T00:45:00+00:00"])]
#[case("0-2 12 ? * * *", "2024-01-01T00:00:00Z", &["2024-01-01T12:00:00+00:00", "2024-01-01T12:01:00+00:00", "2024-01-01T12:02:00+00:00"])]
#[case("0 12 ? JAN/2 * *", "2024-01-31T13:00:00Z", &["2024-03-01T12:00:00+00:00", "2024-03-02T12:00:00+00:00"])]
#[case("0 0 L * ? *", "2024-01-15T00:00:00Z", &["2024-01-31T00:00:00+00:00", "2024-02-29T00:00:00+00:00", "2024-03-31T00:00:00+00:00"])]
#[case("0 9 15W * ? *", "2024-06-01T00:00:00Z", &["2024-06-14T09:00:00+00:00", "2024-07-15T09:00:00+00:00", "2024-08-15T09:00:00+00:00"])]
#[case("0 9 ? * MON#1 *", "2024-04-12T00:00:00Z", &["2024-05-06T09:00:00+00:00", "2024-06-03T09:00:00+00:00"])]
#[case("0 9 ? * 7#4 *", "2024-11-30T09:00:00Z", &["2024-12-28T09:00:00+00:00"])]
#[case("0 9 ? * L *", "2024-01-01T00:00:00Z", &["2024-01-06T09:00:00+00:00", "2024-01-13T09:00:00+00:00"])]
#[case("0 0 1 1 ? 2025,2027", "2024-06-01T00:00:00Z", &["2025-01-01T00:00:00+00:00", "2027-01-01T00:00:00+00:00"])]
#[case("0 0 29 2 ? *", "2024-03-01T00:00:00Z", &["2028-02-29T00:00:00+00:00"])]
fn upcoming_calendar(#[case] expression: &str, #[case] from: &str, #[case] expected: &[&str]) {
    let from = DateTime::parse_from_rfc3339(from).unwrap();
    let options = Options::new(expected.len())
        .mode(MatchMode::Calendar)
        .max_iterations(5 * 366 * 24 * 60);
    let events = validate(expression).unwrap().upcoming_with(&from, &options).unwrap();

    assert_eq!(
        events.iter().map(|t| t.to_rfc3339()).collect::<Vec<_>>(),
        expected,
        "expression = {expression}, from = {from}"
    );
}

#[test]
fn upcoming_calendar_unsupported_year() {
    let from = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
    let options = Options::new(1).mode(MatchMode::Calendar);

    assert!(matches!(
        validate("0 0 1 1 ? L").unwrap().upcoming_with(&from, &options),
        Err(CronError::UnsupportedToken { .. })
    ));
}
