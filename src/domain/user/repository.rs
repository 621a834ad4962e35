//! User repository trait and the lookup capability the forms depend on

use std::fmt::Debug;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{UniqueField, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find the first user whose `field` equals `value` exactly
    async fn find_one_by(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Create a new user; a taken email or username is a conflict
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Read-only existence check used by uniqueness validators
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Whether any account already holds `value` in `field`
    async fn exists(&self, field: UniqueField, value: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<R> UserLookup for R
where
    R: UserRepository + ?Sized,
{
    async fn exists(&self, field: UniqueField, value: &str) -> Result<bool, DomainError> {
        Ok(self.find_one_by(field, value).await?.is_some())
    }
}
