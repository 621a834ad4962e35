//! Registration form

use std::fmt;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::schema::{FieldSchema, FormSchema, ValidationOutcome};
use super::submission::FormSubmission;
use super::validator::Validator;
use crate::domain::DomainError;
use crate::domain::user::{
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, UniqueField, UserLookup,
};

pub const PASSWORD_MISMATCH: &str = "Passwords must match";

static REGISTRATION_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    FormSchema::new("registration")
        .field(
            FieldSchema::new("email")
                .validator(Validator::Required)
                .validator(Validator::Email)
                .unique(UniqueField::Email),
        )
        .field(
            FieldSchema::new("username")
                .validator(Validator::Required)
                .validator(Validator::length(MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH))
                .unique(UniqueField::Username),
        )
        .field(
            FieldSchema::new("password")
                .validator(Validator::Required)
                .validator(Validator::min_length(MIN_PASSWORD_LENGTH)),
        )
        .field(
            FieldSchema::new("pass_confirm")
                .validator(Validator::Required)
                .validator(Validator::EqualTo {
                    other: "password",
                    message: PASSWORD_MISMATCH,
                }),
        )
});

/// New-account sign-up
#[derive(Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub pass_confirm: String,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        pass_confirm: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            pass_confirm: pass_confirm.into(),
        }
    }

    pub fn schema() -> &'static FormSchema {
        &REGISTRATION_SCHEMA
    }

    /// A new account owns no record yet, so nothing is exempt from the
    /// uniqueness lookups.
    pub async fn validate(&self, users: &dyn UserLookup) -> Result<ValidationOutcome, DomainError> {
        Self::schema()
            .validate(&FormSubmission::from(self), users, None)
            .await
    }
}

impl From<&RegistrationForm> for FormSubmission {
    fn from(form: &RegistrationForm) -> Self {
        FormSubmission::new()
            .with_value("email", form.email.as_str())
            .with_value("username", form.username.as_str())
            .with_value("password", form.password.as_str())
            .with_value("pass_confirm", form.pass_confirm.as_str())
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .field("pass_confirm", &"[hidden]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forms::{FieldError, FieldErrorKind};
    use crate::domain::user::MockUserLookup;

    fn free_store() -> MockUserLookup {
        let mut users = MockUserLookup::new();
        users.expect_exists().returning(|_, _| Ok(false));
        users
    }

    fn store_with(taken: UniqueField, taken_value: &'static str) -> MockUserLookup {
        let mut users = MockUserLookup::new();
        users
            .expect_exists()
            .returning(move |field, value| Ok(field == taken && value == taken_value));
        users
    }

    #[tokio::test]
    async fn test_valid_registration() {
        let form = RegistrationForm::new("a@x.com", "ab", "secret1", "secret1");
        let outcome = form.validate(&free_store()).await.unwrap();

        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
    }

    #[tokio::test]
    async fn test_taken_username() {
        let form = RegistrationForm::new("a@x.com", "ab", "secret1", "secret1");
        let outcome = form
            .validate(&store_with(UniqueField::Username, "ab"))
            .await
            .unwrap();

        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(
            outcome.messages().get("username"),
            Some(&vec!["Your username has been registered already!".to_string()])
        );
    }

    #[tokio::test]
    async fn test_taken_email_regardless_of_other_fields() {
        let form = RegistrationForm::new("a@x.com", "a", "123", "456");
        let outcome = form
            .validate(&store_with(UniqueField::Email, "a@x.com"))
            .await
            .unwrap();

        let email_errors = outcome.field_errors("email");
        assert_eq!(email_errors.len(), 1);
        assert_eq!(email_errors[0].kind(), FieldErrorKind::DuplicateValue);
        assert!(!outcome.field_errors("username").is_empty());
        assert!(!outcome.field_errors("password").is_empty());
    }

    #[tokio::test]
    async fn test_password_mismatch_on_confirmation() {
        let form = RegistrationForm::new("a@x.com", "ab", "secret1", "secret2");
        let outcome = form.validate(&free_store()).await.unwrap();

        assert!(!outcome.is_valid());
        assert!(outcome.field_errors("password").is_empty());

        let confirm_errors = outcome.field_errors("pass_confirm");
        assert_eq!(confirm_errors.len(), 1);
        assert_eq!(confirm_errors[0].kind(), FieldErrorKind::Mismatch);
        assert_eq!(confirm_errors[0].to_string(), PASSWORD_MISMATCH);
    }

    #[tokio::test]
    async fn test_password_too_short() {
        let form = RegistrationForm::new("a@x.com", "ab", "12345", "12345");
        let outcome = form.validate(&free_store()).await.unwrap();

        assert_eq!(
            outcome.field_errors("password"),
            &[FieldError::Length {
                min: Some(6),
                max: None
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_username_skips_lookup() {
        let mut users = MockUserLookup::new();
        users
            .expect_exists()
            .withf(|field, _| *field == UniqueField::Email)
            .times(1)
            .returning(|_, _| Ok(false));

        let form = RegistrationForm::new("a@x.com", &"u".repeat(21), "secret1", "secret1");
        let outcome = form.validate(&users).await.unwrap();

        assert_eq!(
            outcome.field_errors("username")[0].to_string(),
            "Field must be between 2 and 20 characters long."
        );
    }

    #[tokio::test]
    async fn test_validation_is_idempotent() {
        let users = store_with(UniqueField::Email, "a@x.com");
        let form = RegistrationForm::new("a@x.com", "x", "secret1", "secret");

        let first = form.validate(&users).await.unwrap();
        let second = form.validate(&users).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_schema_declaration() {
        let schema = RegistrationForm::schema();
        assert_eq!(schema.name(), "registration");

        let fields: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(fields, ["email", "username", "password", "pass_confirm"]);

        let unique: Vec<_> = schema
            .fields()
            .iter()
            .filter_map(|f| f.uniqueness().map(|check| (f.name(), check.field())))
            .collect();
        assert_eq!(
            unique,
            [("email", UniqueField::Email), ("username", UniqueField::Username)]
        );

        assert_eq!(
            schema.fields()[3].validators().last(),
            Some(&Validator::EqualTo {
                other: "password",
                message: PASSWORD_MISMATCH
            })
        );
    }

    #[tokio::test]
    async fn test_all_required_missing() {
        let mut users = MockUserLookup::new();
        users.expect_exists().times(0);

        let outcome = RegistrationForm::default().validate(&users).await.unwrap();

        for field in ["email", "username", "password", "pass_confirm"] {
            assert_eq!(outcome.field_errors(field), &[FieldError::Required]);
        }
    }
}
