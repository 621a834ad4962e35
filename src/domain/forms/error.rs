//! Field-level validation errors

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::user::UniqueField;

/// Broad category of a field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    RequiredFieldMissing,
    FormatInvalid,
    Mismatch,
    DuplicateValue,
}

/// A single failure attached to one form field
///
/// The `Display` text is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Invalid email address.")]
    InvalidEmail,

    #[error("{}", length_message(.min, .max))]
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    #[error("{message}")]
    Mismatch {
        other: &'static str,
        message: &'static str,
    },

    #[error("file type not allowed")]
    FileTypeNotAllowed,

    #[error("Your {field} has been registered already!")]
    Duplicate { field: UniqueField },
}

impl FieldError {
    pub fn kind(&self) -> FieldErrorKind {
        match self {
            Self::Required => FieldErrorKind::RequiredFieldMissing,
            Self::InvalidEmail | Self::Length { .. } | Self::FileTypeNotAllowed => {
                FieldErrorKind::FormatInvalid
            }
            Self::Mismatch { .. } => FieldErrorKind::Mismatch,
            Self::Duplicate { .. } => FieldErrorKind::DuplicateValue,
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn length_message(min: &Option<usize>, max: &Option<usize>) -> String {
    let plural = |n: usize| if n == 1 { "character" } else { "characters" };

    match (*min, *max) {
        (Some(min), Some(max)) => {
            format!("Field must be between {} and {} characters long.", min, max)
        }
        (Some(min), None) => format!("Field must be at least {} {} long.", min, plural(min)),
        (None, Some(max)) => format!("Field cannot be longer than {} {}.", max, plural(max)),
        (None, None) => "Field has an invalid length.".to_string(),
    }
}
