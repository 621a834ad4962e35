//! Profile update form

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::schema::{FieldSchema, FormSchema, ValidationOutcome};
use super::submission::{FormSubmission, UploadedFile};
use super::validator::Validator;
use crate::domain::DomainError;
use crate::domain::user::{
    CurrentIdentity, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH, PICTURE_EXTENSIONS, UniqueField,
    UserLookup,
};

static UPDATE_USER_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    FormSchema::new("update_user")
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
            FieldSchema::new("picture").validator(Validator::FileAllowed(PICTURE_EXTENSIONS)),
        )
});

/// Account details edited by a logged-in user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(skip)]
    pub picture: Option<UploadedFile>,
}

impl UpdateUserForm {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            picture: None,
        }
    }

    pub fn with_picture(mut self, picture: UploadedFile) -> Self {
        self.picture = Some(picture);
        self
    }

    pub fn schema() -> &'static FormSchema {
        &UPDATE_USER_SCHEMA
    }

    /// Values equal to the identity's own email or username are accepted
    /// without consulting the store. Without an identity every value is
    /// checked.
    pub async fn validate(
        &self,
        users: &dyn UserLookup,
        identity: Option<&CurrentIdentity>,
    ) -> Result<ValidationOutcome, DomainError> {
        Self::schema()
            .validate(&FormSubmission::from(self), users, identity)
            .await
    }
}

impl From<&UpdateUserForm> for FormSubmission {
    fn from(form: &UpdateUserForm) -> Self {
        let mut submission = FormSubmission::new()
            .with_value("email", form.email.as_str())
            .with_value("username", form.username.as_str());

        if let Some(picture) = &form.picture {
            submission.insert_file("picture", picture.clone());
        }

        submission
    }
}
