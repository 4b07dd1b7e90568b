use thiserror::Error;

/// Default upper bound for a user's biography.
pub const ABOUT_MAX_LENGTH: usize = 70;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value is too short (min {min}, got {got})")]
    TooShort { min: usize, got: usize },
    #[error("value is too long (max {max}, got {got})")]
    TooLong { max: usize, got: usize },
}

/// Length in Unicode scalar values, the unit profile limits are expressed in.
pub fn text_length(value: &str) -> usize {
    value.chars().count()
}

/// Trim and check a first name. Returns the trimmed value.
///
/// Names have no upper bound; only a blank first name is rejected.
pub fn validate_first_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    let len = text_length(name);
    if len < 1 {
        return Err(ValidationError::TooShort { min: 1, got: len });
    }
    Ok(name)
}

pub fn validate_about(about: &str, max: usize) -> Result<(), ValidationError> {
    let len = text_length(about);
    if len > max {
        return Err(ValidationError::TooLong { max, got: len });
    }
    Ok(())
}
