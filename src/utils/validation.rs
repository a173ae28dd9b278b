use crate::utils::error::{Result, RouteError};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn airport_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("airport code pattern is valid"))
}

/// IATA style: exactly three uppercase ASCII letters.
pub fn validate_airport_code(field_name: &str, code: &str) -> Result<()> {
    if !airport_code_pattern().is_match(code) {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Airport code must be three uppercase letters".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_distinct(field_name: &str, left: &str, right: &str) -> Result<()> {
    if left == right {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: right.to_string(),
            reason: format!("Must differ from {}", left),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RouteError::MissingConfigError {
        field: field_name.to_string(),
    })
}
