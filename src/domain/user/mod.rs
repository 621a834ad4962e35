//! User domain
//!
//! Account entities, the repository trait, and the lookup capability that
//! uniqueness validators query.

mod entity;
mod repository;
mod validation;

pub use entity::{CurrentIdentity, UniqueField, User, UserId};
pub use repository::{UserLookup, UserRepository};
pub use validation::{
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, PICTURE_EXTENSIONS,
    UserValidationError, char_length, file_extension, has_allowed_extension, is_blank,
    is_valid_email, parse_user_id, validate_user_id,
};

#[cfg(test)]
pub use repository::MockUserLookup;
