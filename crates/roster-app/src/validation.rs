// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidNumber,
    NegativeNumber,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber => f.write_str("invalid salary; enter a number"),
            Self::NegativeNumber => f.write_str("invalid salary; must not be negative"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Parses a salary typed by the user. Separators (`,` and `_`) are ignored
/// and fractional input is rounded to whole rupees.
pub fn parse_salary(input: &str) -> ValidationResult<i64> {
    let cleaned = strip_separators(input.trim());
    if cleaned.is_empty() {
        return Err(ValidationError::InvalidNumber);
    }

    if let Ok(value) = cleaned.parse::<i64>() {
        return if value < 0 {
            Err(ValidationError::NegativeNumber)
        } else {
            Ok(value)
        };
    }

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber);
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeNumber);
    }
    let rounded = value.round();
    if rounded > i64::MAX as f64 {
        return Err(ValidationError::InvalidNumber);
    }
    Ok(rounded as i64)
}

/// Filter bounds are permissive: blank or unparseable input means "no bound".
pub fn parse_salary_bound(input: &str) -> Option<i64> {
    let cleaned = strip_separators(input.trim());
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(value) = cleaned.parse::<i64>() {
        return Some(value);
    }
    let value = cleaned.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

pub fn format_salary(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{}", comma_format(amount.unsigned_abs()))
}

fn strip_separators(input: &str) -> String {
    input.chars().filter(|ch| !matches!(ch, ',' | '_')).collect()
}

fn comma_format(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
