//! Account forms
//!
//! Declarative field schemas for the login, registration and profile-update
//! pages, the validators they are built from, and the driver that runs
//! them against a submission.

mod error;
mod login;
mod registration;
mod schema;
mod submission;
mod uniqueness;
mod update_user;
mod validator;

pub use error::{FieldError, FieldErrorKind};
pub use login::LoginForm;
pub use registration::{PASSWORD_MISMATCH, RegistrationForm};
pub use schema::{FieldSchema, FormSchema, ValidationOutcome};
pub use submission::{FormSubmission, UploadedFile};
pub use uniqueness::UniquenessCheck;
pub use update_user::UpdateUserForm;
pub use validator::Validator;
