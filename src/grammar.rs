//! Acceptor of the per-field syntax.
//!
//! Forms, `V` is a single value of the field:
//! - range: `V`, `*-V`, `V-V`, `V-*`;
//! - list: one or more ranges joined by `,`;
//! - step: `*/S` or `V/S`, where `S` is a string of digits with at least one non-zero digit;
//! - common: list, `*` or step.
//!
//! | Field        | Accepted                       |
//! |--------------|--------------------------------|
//! | minute       | common                         |
//! | hour         | common                         |
//! | day-of-month | common, `?`, `L`, `VW`         |
//! | month        | common                         |
//! | day-of-week  | list, `*`, `?`, `L`, `V#[1-5]` |
//! | year         | common, `?`, `L`               |
use crate::field::Field;

/// Returns `true` if `input` is a syntactically valid text of the `field`.
pub(crate) fn is_valid(field: Field, input: &str) -> bool {
    match field {
        Field::Minute | Field::Hour | Field::Month => is_common(field, input),
        Field::DayOfMonth => {
            is_common(field, input)
                || input == "?"
                || input == "L"
                || input.strip_suffix('W').is_some_and(|value| field.is_value(value))
        }
        Field::DayOfWeek => {
            is_list(field, input) || matches!(input, "*" | "?" | "L") || is_nth_weekday(field, input)
        }
        Field::Year => is_common(field, input) || input == "?" || input == "L",
    }
}

fn is_common(field: Field, input: &str) -> bool {
    is_list(field, input) || input == "*" || is_step(field, input)
}

fn is_list(field: Field, input: &str) -> bool {
    input.split(',').all(|item| is_range(field, item))
}

fn is_range(field: Field, input: &str) -> bool {
    match input.split_once('-') {
        Some(("*", end)) => field.is_value(end),
        Some((start, "*")) => field.is_value(start),
        Some((start, end)) => field.is_value(start) && field.is_value(end),
        None => field.is_value(input),
    }
}

fn is_step(field: Field, input: &str) -> bool {
    match input.split_once('/') {
        Some((base, step)) => (base == "*" || field.is_value(base)) && is_step_size(step),
        None => false,
    }
}

/// Digits only, at least one of them isn't zero: `5`, `10`, `007` are fine, `0` and `00` aren't.
fn is_step_size(input: &str) -> bool {
    input.bytes().all(|b| b.is_ascii_digit()) && input.bytes().any(|b| b != b'0')
}

fn is_nth_weekday(field: Field, input: &str) -> bool {
    match input.split_once('#') {
        Some((dow, nth)) => field.is_value(dow) && matches!(nth, "1" | "2" | "3" | "4" | "5"),
        None => false,
    }
}
