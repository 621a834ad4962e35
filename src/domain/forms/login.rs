//! Login form

use std::fmt;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::schema::{FieldSchema, FormSchema, ValidationOutcome};
use super::submission::FormSubmission;
use super::validator::Validator;

static LOGIN_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    FormSchema::new("login")
        .field(
            FieldSchema::new("email")
                .validator(Validator::Required)
                .validator(Validator::Email),
        )
        .field(FieldSchema::new("password").validator(Validator::Required))
});

/// Credentials posted to the login page
///
/// Checking them against stored accounts is the authentication layer's job;
/// this form only makes sure both were supplied in a usable shape.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn schema() -> &'static FormSchema {
        &LOGIN_SCHEMA
    }

    pub fn validate(&self) -> ValidationOutcome {
        Self::schema().validate_syntax(&FormSubmission::from(self))
    }
}

impl From<&LoginForm> for FormSubmission {
    fn from(form: &LoginForm) -> Self {
        FormSubmission::new()
            .with_value("email", form.email.as_str())
            .with_value("password", form.password.as_str())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .finish()
    }
}
