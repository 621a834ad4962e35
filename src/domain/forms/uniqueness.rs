//! Store-backed uniqueness check for email and username fields

use super::error::FieldError;
use crate::domain::DomainError;
use crate::domain::user::{CurrentIdentity, UniqueField, UserLookup};

/// Rejects a value that another account already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniquenessCheck {
    field: UniqueField,
}

impl UniquenessCheck {
    pub fn new(field: UniqueField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> UniqueField {
        self.field
    }

    /// Returns the field error when `value` is taken.
    ///
    /// When `identity` already owns `value` the store is not queried.
    pub async fn check(
        &self,
        value: &str,
        users: &dyn UserLookup,
        identity: Option<&CurrentIdentity>,
    ) -> Result<Option<FieldError>, DomainError> {
        if identity.is_some_and(|current| current.value_of(self.field) == value) {
            return Ok(None);
        }

        if users.exists(self.field, value).await? {
            return Ok(Some(FieldError::Duplicate { field: self.field }));
        }

        Ok(None)
    }
}
