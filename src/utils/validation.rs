use crate::utils::error::{Result, StaffingError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_id(field_name: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(StaffingError::validation(
            field_name,
            format!("must be a positive integer, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StaffingError::validation(
            field_name,
            format!("cannot be empty or whitespace-only, got '{}'", value),
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    // JSON has no representation for NaN or infinity
    if !value.is_finite() || value < 0.0 {
        return Err(StaffingError::validation(
            field_name,
            format!("must be a finite non-negative number, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(StaffingError::validation(
            field_name,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StaffingError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(StaffingError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}
