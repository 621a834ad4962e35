//! Application state for shared services

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::forms::{LoginForm, RegistrationForm, UpdateUserForm, ValidationOutcome};
use crate::domain::user::UserRepository;
use crate::infrastructure::user::AccountFormService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_forms: Arc<dyn AccountFormServiceTrait>,
}

impl AppState {
    pub fn new(account_forms: Arc<dyn AccountFormServiceTrait>) -> Self {
        Self { account_forms }
    }
}

/// Trait for account form validation
#[async_trait::async_trait]
pub trait AccountFormServiceTrait: Send + Sync {
    fn validate_login(&self, form: &LoginForm) -> ValidationOutcome;
    async fn validate_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<ValidationOutcome, DomainError>;
    async fn validate_update(
        &self,
        user_id: &str,
        form: &UpdateUserForm,
    ) -> Result<ValidationOutcome, DomainError>;
    /// Number of stored accounts; used as the readiness probe
    async fn count_users(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> AccountFormServiceTrait for AccountFormService<R> {
    fn validate_login(&self, form: &LoginForm) -> ValidationOutcome {
        AccountFormService::validate_login(self, form)
    }

    async fn validate_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<ValidationOutcome, DomainError> {
        AccountFormService::validate_registration(self, form).await
    }

    async fn validate_update(
        &self,
        user_id: &str,
        form: &UpdateUserForm,
    ) -> Result<ValidationOutcome, DomainError> {
        AccountFormService::validate_update(self, user_id, form).await
    }

    async fn count_users(&self) -> Result<usize, DomainError> {
        AccountFormService::count(self).await
    }
}
