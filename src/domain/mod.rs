//! Domain layer - Account entities and form validation

pub mod error;
pub mod forms;
pub mod user;

pub use error::DomainError;
pub use forms::{
    FieldError, FieldErrorKind, FormSchema, FormSubmission, LoginForm, RegistrationForm,
    UpdateUserForm, UploadedFile, ValidationOutcome,
};
pub use user::{CurrentIdentity, UniqueField, User, UserId, UserLookup, UserRepository};
