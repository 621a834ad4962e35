//! Stateless syntactic field validators

use super::error::FieldError;
use super::submission::FormSubmission;
use crate::domain::user::{char_length, has_allowed_extension, is_blank, is_valid_email};

/// One syntactic rule applied to a single field
///
/// Text rules read the field's text value (absent counts as empty).
/// `FileAllowed` reads the field's file part and passes when none was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    Required,
    Email,
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// The field must equal the value of `other`
    EqualTo {
        other: &'static str,
        message: &'static str,
    },
    FileAllowed(&'static [&'static str]),
}

impl Validator {
    pub fn length(min: usize, max: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn min_length(min: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: None,
        }
    }

    pub fn check(&self, field: &str, submission: &FormSubmission) -> Result<(), FieldError> {
        let value = submission.text(field).unwrap_or_default();

        match self {
            Self::Required => {
                if is_blank(value) {
                    return Err(FieldError::Required);
                }
            }
            Self::Email => {
                if !is_valid_email(value) {
                    return Err(FieldError::InvalidEmail);
                }
            }
            Self::Length { min, max } => {
                let length = char_length(value);
                let too_short = min.is_some_and(|min| length < min);
                let too_long = max.is_some_and(|max| length > max);

                if too_short || too_long {
                    return Err(FieldError::Length {
                        min: *min,
                        max: *max,
                    });
                }
            }
            Self::EqualTo { other, message } => {
                if value != submission.text(other).unwrap_or_default() {
                    return Err(FieldError::Mismatch {
                        other: *other,
                        message: *message,
                    });
                }
            }
            Self::FileAllowed(extensions) => {
                if let Some(file) = submission.file(field) {
                    if !has_allowed_extension(&file.filename, extensions) {
                        return Err(FieldError::FileTypeNotAllowed);
                    }
                }
            }
        }

        Ok(())
    }
}
