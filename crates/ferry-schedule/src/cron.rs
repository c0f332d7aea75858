//! Cron expression validation.
//!
//! Accepts the standard 5-field form, an optional leading seconds field, and an
//! optional trailing year field.

use croner::Cron;
use ferry_core::{ValidationError, ValidationResult};

const MIN_YEAR: u32 = 1970;
const MAX_YEAR: u32 = 2099;

/// Check that `expression` parses as a cron schedule.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCron`] with the parser's reason.
pub fn validate_cron(expression: &str) -> ValidationResult<()> {
    let invalid = |reason: String| ValidationError::InvalidCron {
        expression: expression.to_string(),
        reason,
    };

    let fields: Vec<&str> = expression.split_whitespace().collect();
    let pattern = match fields.len() {
        5 | 6 => fields.join(" "),
        7 => {
            validate_year_field(fields[6]).map_err(invalid)?;
            fields[..6].join(" ")
        }
        count => return Err(invalid(format!("expected 5, 6 or 7 fields, found {count}"))),
    };

    Cron::new(&pattern)
        .with_seconds_optional()
        .parse()
        .map(|_| ())
        .map_err(|err| invalid(err.to_string()))
}

fn validate_year_field(field: &str) -> Result<(), String> {
    if field == "*" || field == "?" {
        return Ok(());
    }
    for part in field.split(',') {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (part, None),
        };
        if let Some(step) = step {
            match step.parse::<u32>() {
                Ok(value) if value > 0 => {}
                _ => return Err(format!("invalid year step '{step}'")),
            }
        }
        if range == "*" {
            continue;
        }
        let (start, end) = range.split_once('-').unwrap_or((range, range));
        let start = parse_year(start)?;
        let end = parse_year(end)?;
        if start > end {
            return Err(format!("year range '{range}' is reversed"));
        }
    }
    Ok(())
}

fn parse_year(value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .ok_or_else(|| format!("invalid year '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_expressions_are_accepted() {
        for expression in [
            "0 3 * * *",
            "*/15 * * * 1-5",
            "30 0 3 * * *",
            "0 0 12 1 1 * 2030",
            "0 0 12 * * MON 2026-2030",
        ] {
            assert!(
                validate_cron(expression).is_ok(),
                "{expression} should be valid"
            );
        }
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        for expression in ["", "* * *", "61 * * * *", "0 25 * * *", "0 0 0 1 1 * 1800"] {
            let err = validate_cron(expression).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidCron { .. }),
                "{expression} should be invalid"
            );
        }
    }

    #[test]
    fn invalid_cron_keeps_the_expression() {
        let err = validate_cron("not a cron").unwrap_err();
        assert_eq!(err.to_string(), "invalid cron expression");
        assert!(matches!(err, ValidationError::InvalidCron { ref expression, .. } if expression == "not a cron"));
    }
}
