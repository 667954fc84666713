//! Conversion of textual performances into times and marks.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("performance is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("'{0}' is negative")]
    Negative(String),

    #[error("seconds in '{0}' must be below 60")]
    SecondsOutOfRange(String),

    #[error("'{0}' must be seconds or minutes:seconds")]
    Malformed(String),

    #[error("performance is longer than {0} characters")]
    TooLong(usize),
}

/// Parses `"10.85"` or `"4:32.10"` into seconds.
pub fn parse_time(text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(ParseError::Negative(text.to_string()));
    }

    match trimmed.split_once(':') {
        None => unsigned_number(trimmed, text),
        Some((minutes, seconds)) => {
            if seconds.contains(':') || minutes.contains('.') {
                return Err(ParseError::Malformed(text.to_string()));
            }
            let minutes = unsigned_number(minutes, text)?;
            let seconds = unsigned_number(seconds, text)?;
            if seconds >= 60.0 {
                return Err(ParseError::SecondsOutOfRange(text.to_string()));
            }
            Ok(minutes * 60.0 + seconds)
        }
    }
}

/// Parses a measured mark in meters, ignoring unit suffixes such as `"7.45m"`.
pub fn parse_distance(text: &str) -> Result<f64, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let cleaned = strip_mark(text);
    let value: f64 = cleaned
        .parse()
        .map_err(|_| ParseError::NotNumeric(text.to_string()))?;

    if value.is_nan() {
        return Err(ParseError::NotNumeric(text.to_string()));
    }
    Ok(value)
}

/// Parses a jump height in meters.
///
/// Values above 10 are taken to be centimeters, so `"205"` reads as 2.05 m.
/// A centimeter value of 10 or below is indistinguishable from meters.
pub fn parse_height(text: &str) -> Result<f64, ParseError> {
    let value = parse_distance(text)?;
    if value.abs() > 10.0 {
        Ok(value / 100.0)
    } else {
        Ok(value)
    }
}

fn unsigned_number(part: &str, original: &str) -> Result<f64, ParseError> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(ParseError::NotNumeric(original.to_string()));
    }
    part.parse()
        .map_err(|_| ParseError::NotNumeric(original.to_string()))
}

fn strip_mark(text: &str) -> String {
    text.trim()
        .chars()
        .enumerate()
        .filter(|(i, c)| c.is_ascii_digit() || *c == '.' || (*c == '-' && *i == 0))
        .map(|(_, c)| c)
        .collect()
}
