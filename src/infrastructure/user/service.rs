//! Account form service
//!
//! Runs the login, registration and profile-update forms against the user
//! store and logs each outcome.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::DomainError;
use crate::domain::forms::{LoginForm, RegistrationForm, UpdateUserForm, ValidationOutcome};
use crate::domain::user::{CurrentIdentity, UserId, UserRepository};

/// Validates account forms against a user repository
#[derive(Debug)]
pub struct AccountFormService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> AccountFormService<R> {
    /// Create a new account form service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate a login submission; the store is not consulted
    #[instrument(skip(self, form), fields(form = "login"))]
    pub fn validate_login(&self, form: &LoginForm) -> ValidationOutcome {
        let outcome = form.validate();
        log_outcome("login", &outcome);
        outcome
    }

    /// Validate a registration submission, including email and username
    /// availability
    #[instrument(skip(self, form), fields(form = "registration"))]
    pub async fn validate_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<ValidationOutcome, DomainError> {
        let outcome = form
            .validate(self.repository.as_ref())
            .await
            .inspect_err(|e| warn!("Registration validation aborted: {}", e))?;

        log_outcome("registration", &outcome);
        Ok(outcome)
    }

    /// Validate a profile update for the account identified by `user_id`
    ///
    /// The account's current email and username are exempt from the
    /// uniqueness checks. An unknown id is a [`DomainError::NotFound`].
    #[instrument(skip(self, form), fields(form = "update_user"))]
    pub async fn validate_update(
        &self,
        user_id: &str,
        form: &UpdateUserForm,
    ) -> Result<ValidationOutcome, DomainError> {
        let id = user_id
            .parse::<UserId>()
            .map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let user = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user_id)))?;

        let identity = CurrentIdentity::from(&user);

        let outcome = form
            .validate(self.repository.as_ref(), Some(&identity))
            .await
            .inspect_err(|e| warn!("Profile update validation aborted: {}", e))?;

        log_outcome("update_user", &outcome);
        Ok(outcome)
    }

    /// Count stored users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

fn log_outcome(form: &str, outcome: &ValidationOutcome) {
    if outcome.is_valid() {
        info!(form, "Form accepted");
    } else {
        let fields: Vec<&str> = outcome.errors().keys().copied().collect();
        debug!(form, ?fields, "Form rejected");
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::forms::{FieldErrorKind, UploadedFile};
    use crate::domain::user::{UniqueField, User};
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn existing_user() -> User {
        User::new(UserId::new(1).unwrap(), "a@x.com", "ab", "hash")
    }

    fn create_service() -> AccountFormService<InMemoryUserRepository> {
        let repository = InMemoryUserRepository::with_users(vec![
            existing_user(),
            User::new(UserId::new(2).unwrap(), "c@x.com", "cd", "hash"),
        ])
        .unwrap();

        AccountFormService::new(Arc::new(repository))
    }

    #[test]
    fn test_validate_login() {
        let service = create_service();

        assert!(
            service
                .validate_login(&LoginForm::new("a@x.com", "anything"))
                .is_valid()
        );
        assert!(!service.validate_login(&LoginForm::default()).is_valid());
    }

    #[tokio::test]
    async fn test_registration_with_free_values() {
        let service = create_service();
        let form = RegistrationForm::new("new@x.com", "newbie", "secret1", "secret1");

        let outcome = service.validate_registration(&form).await.unwrap();
        assert!(outcome.is_valid());
    }

    #[tokio::test]
    async fn test_registration_with_taken_values() {
        let service = create_service();
        let form = RegistrationForm::new("a@x.com", "cd", "secret1", "secret1");

        let outcome = service.validate_registration(&form).await.unwrap();

        assert_eq!(
            outcome.field_errors("email")[0].kind(),
            FieldErrorKind::DuplicateValue
        );
        assert_eq!(
            outcome.field_errors("username")[0].to_string(),
            "Your username has been registered already!"
        );
    }

    #[tokio::test]
    async fn test_update_keeps_own_values() {
        let service = create_service();
        let form = UpdateUserForm::new("a@x.com", "ab");

        let outcome = service.validate_update("1", &form).await.unwrap();
        assert!(outcome.is_valid());
    }

    #[tokio::test]
    async fn test_update_to_another_users_username() {
        let service = create_service();
        let form = UpdateUserForm::new("a@x.com", "cd");

        let outcome = service.validate_update("1", &form).await.unwrap();

        assert!(outcome.field_errors("email").is_empty());
        assert_eq!(outcome.field_errors("username").len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_disallowed_picture() {
        let service = create_service();
        let form = UpdateUserForm::new("a@x.com", "ab")
            .with_picture(UploadedFile::new("avatar.bmp", vec![1u8, 2, 3]));

        let outcome = service.validate_update("1", &form).await.unwrap();

        assert_eq!(
            outcome.messages().get("picture"),
            Some(&vec!["file type not allowed".to_string()])
        );
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let service = create_service();
        let form = UpdateUserForm::new("a@x.com", "ab");

        let result = service.validate_update("99", &form).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        for raw in ["", "nobody", "0"] {
            let result = service.validate_update(raw, &form).await;
            assert!(matches!(result, Err(DomainError::InvalidId { .. })));
        }
    }

    #[derive(Debug)]
    struct FailingRepository;

    #[async_trait]
    impl UserRepository for FailingRepository {
        async fn get(&self, _id: &UserId) -> Result<Option<User>, DomainError> {
            Ok(Some(existing_user()))
        }

        async fn find_one_by(
            &self,
            _field: UniqueField,
            _value: &str,
        ) -> Result<Option<User>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        async fn create(&self, user: User) -> Result<User, DomainError> {
            Ok(user)
        }

        async fn count(&self) -> Result<usize, DomainError> {
            Err(DomainError::storage("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_field_error() {
        let service = AccountFormService::new(Arc::new(FailingRepository));

        let form = RegistrationForm::new("a@x.com", "ab", "secret1", "secret1");
        let result = service.validate_registration(&form).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        let form = UpdateUserForm::new("b@x.com", "ab");
        let result = service.validate_update("1", &form).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        // Unchanged identity never reaches the failing lookup
        let form = UpdateUserForm::new("a@x.com", "ab");
        assert!(service.validate_update("1", &form).await.unwrap().is_valid());
    }
}
