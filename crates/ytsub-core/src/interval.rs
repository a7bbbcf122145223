//! Refresh-interval expressions: `d`/`h`/`m`/`s` components in that order
//! (`2h30m`, `90s`, `1d`), or a bare integer in seconds.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IntervalError {
    #[error("unrecognized interval `{0}`; expected e.g. `2h30m`, `90s`, `1d`, or plain seconds")]
    Unrecognized(String),
    #[error("interval `{0}` is zero")]
    Zero(String),
}

const UNITS: [(char, u64); 4] = [('d', 86_400), ('h', 3_600), ('m', 60), ('s', 1)];

/// Parses an interval expression. Zero or unparsable input is an error;
/// callers treat that as a startup fatal.
pub fn parse_interval(expr: &str) -> Result<Duration, IntervalError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(IntervalError::Unrecognized(expr.to_string()));
    }

    // Bare integer = seconds.
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let secs: u64 = trimmed
            .parse()
            .map_err(|_| IntervalError::Unrecognized(expr.to_string()))?;
        return nonzero(secs, expr);
    }

    let mut rest = trimmed;
    let mut total: u64 = 0;
    for (suffix, secs_per) in UNITS {
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || rest[digits..].chars().next() != Some(suffix) {
            continue;
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|_| IntervalError::Unrecognized(expr.to_string()))?;
        total = value
            .checked_mul(secs_per)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| IntervalError::Unrecognized(expr.to_string()))?;
        rest = &rest[digits + 1..];
    }

    if !rest.is_empty() {
        return Err(IntervalError::Unrecognized(expr.to_string()));
    }
    nonzero(total, expr)
}

fn nonzero(secs: u64, expr: &str) -> Result<Duration, IntervalError> {
    if secs == 0 {
        return Err(IntervalError::Zero(expr.to_string()));
    }
    Ok(Duration::from_secs(secs))
}
