//! User validation utilities
//!
//! Identifier rules plus the primitive predicates the account forms are
//! built from.

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID must be a whole number, got '{0}'")]
    NotANumber(String),

    #[error("User ID must be positive, got {0}")]
    NotPositive(i64),
}

pub const MIN_USERNAME_LENGTH: usize = 2;
pub const MAX_USERNAME_LENGTH: usize = 20;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Extensions accepted for profile pictures, compared case-insensitively
pub const PICTURE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Account ids are database keys starting at 1
pub fn validate_user_id(id: i64) -> Result<(), UserValidationError> {
    if id < 1 {
        return Err(UserValidationError::NotPositive(id));
    }

    Ok(())
}

/// Parse a user ID taken from a URL path segment
pub fn parse_user_id(raw: &str) -> Result<i64, UserValidationError> {
    let id = raw
        .parse::<i64>()
        .map_err(|_| UserValidationError::NotANumber(raw.to_string()))?;

    validate_user_id(id)?;
    Ok(id)
}

/// True when a submitted value carries no data (empty or whitespace only)
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Syntactic email check; does not resolve the domain
///
/// The domain must be dot-separated, so `a@localhost` is rejected.
pub fn is_valid_email(value: &str) -> bool {
    if !value.validate_email() {
        return false;
    }

    value.rsplit_once('@').is_some_and(|(_, domain)| {
        domain.split('.').filter(|label| !label.is_empty()).count() >= 2
    })
}

/// Length in characters, not bytes
pub fn char_length(value: &str) -> usize {
    value.chars().count()
}

/// Extension after the last dot, lowercased
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Whether the declared filename ends in one of `allowed`
///
/// A name without a dot is compared as a whole, so a file called `png`
/// passes.
pub fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    let ext = file_extension(filename).unwrap_or_else(|| filename.to_lowercase());
    allowed.iter().any(|candidate| *candidate == ext)
}
