//! Parser for standard five-field cron expressions.
//!
//! Grammar per field: a comma-separated list of terms, where a term is
//! `*`, `?` (day fields only), `N`, `N-M`, or any of those followed by `/STEP`.
//! Month and day-of-week accept three-letter names. `@hourly`, `@daily`,
//! `@midnight`, `@weekly`, `@monthly`, `@yearly` and `@annually` are accepted
//! as whole-expression shorthands.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::field::{FieldKind, FieldSet};
use super::schedule::CronSchedule;

/// Expands an `@` descriptor into its five-field form.
fn expand_descriptor(descriptor: &str) -> ParseResult<&'static str> {
    Ok(match descriptor.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => "0 0 1 1 *",
        "@monthly" => "0 0 1 * *",
        "@weekly" => "0 0 * * 0",
        "@daily" | "@midnight" => "0 0 * * *",
        "@hourly" => "0 * * * *",
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::UnknownDescriptor,
                None,
                format!("'{descriptor}' is not a supported descriptor"),
            ));
        }
    })
}

/// ## Summary
/// Parses a cron expression into a schedule.
///
/// ## Errors
/// Returns a [`ParseError`] naming the offending field when the expression is
/// empty, does not have exactly five fields, or contains an invalid term.
pub fn parse(expression: &str) -> ParseResult<CronSchedule> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::Empty,
            None,
            "cron expression is empty",
        ));
    }

    let body = if trimmed.starts_with('@') {
        expand_descriptor(trimmed)?
    } else {
        trimmed
    };

    let fields: Vec<&str> = body.split_whitespace().collect();
    let [minute, hour, day_of_month, month, day_of_week] = fields.as_slice() else {
        return Err(ParseError::field_count(fields.len()));
    };

    let mut days_of_week = parse_field(day_of_week, FieldKind::DayOfWeek)?;
    days_of_week.fold_sunday();

    Ok(CronSchedule {
        minutes: parse_field(minute, FieldKind::Minute)?,
        hours: parse_field(hour, FieldKind::Hour)?,
        days_of_month: parse_field(day_of_month, FieldKind::DayOfMonth)?,
        months: parse_field(month, FieldKind::Month)?,
        days_of_week,
        expression: trimmed.to_string(),
    })
}

/// Parses one comma-separated field.
fn parse_field(text: &str, kind: FieldKind) -> ParseResult<FieldSet> {
    let mut set = FieldSet::empty();
    for term in text.split(',') {
        parse_term(term, kind, &mut set)?;
    }
    Ok(set)
}

fn parse_term(term: &str, kind: FieldKind, set: &mut FieldSet) -> ParseResult<()> {
    if term.is_empty() {
        return Err(ParseError::invalid_value(kind, term));
    }

    let (range, step) = match term.split_once('/') {
        Some((range, step)) => (range, Some(parse_step(step, kind)?)),
        None => (term, None),
    };

    let (min, max) = kind.bounds();
    let is_wildcard = range == "*" || (range == "?" && kind.allows_question_mark());

    let (start, end) = if is_wildcard {
        (min, max)
    } else if let Some((low, high)) = range.split_once('-') {
        let low = parse_value(low, kind)?;
        let high = parse_value(high, kind)?;
        if low > high {
            return Err(ParseError::new(
                ParseErrorKind::InvalidRange,
                Some(kind),
                format!("range start {low} is after end {high}"),
            ));
        }
        (low, high)
    } else {
        let value = parse_value(range, kind)?;
        // `N/STEP` runs from N to the end of the field.
        if step.is_some() { (value, max) } else { (value, value) }
    };

    let step = step.unwrap_or(1);
    if is_wildcard && step == 1 {
        set.mark_star();
    }
    set.insert_range(start, end, step);
    Ok(())
}

fn parse_step(text: &str, kind: FieldKind) -> ParseResult<u8> {
    match text.parse::<u8>() {
        Ok(step) if step > 0 => Ok(step),
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidStep,
            Some(kind),
            format!("step '{text}' must be a positive number"),
        )),
    }
}

fn parse_value(text: &str, kind: FieldKind) -> ParseResult<u8> {
    if let Some(value) = kind.name_value(text) {
        return Ok(value);
    }
    let value = text
        .parse::<u8>()
        .map_err(|_err| ParseError::invalid_value(kind, text))?;
    let (min, max) = kind.bounds();
    if value < min || value > max {
        return Err(ParseError::out_of_range(kind, value));
    }
    Ok(value)
}
