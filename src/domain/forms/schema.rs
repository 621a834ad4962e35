//! Form schemas and the validation driver
//!
//! A [`FormSchema`] is an ordered list of [`FieldSchema`]s. Validation walks
//! the fields in order; within a field the syntactic validators run in
//! declaration order and stop at the first failure, and the uniqueness check
//! only runs once every syntactic validator of that field has passed. A
//! failing field never stops the remaining fields from being checked, so the
//! caller always receives the complete error mapping.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::error::FieldError;
use super::submission::FormSubmission;
use super::uniqueness::UniquenessCheck;
use super::validator::Validator;
use crate::domain::DomainError;
use crate::domain::user::{CurrentIdentity, UniqueField, UserLookup};

/// Validators declared for one field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: &'static str,
    validators: Vec<Validator>,
    unique: Option<UniquenessCheck>,
}

impl FieldSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            validators: Vec::new(),
            unique: None,
        }
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Attach a store-backed uniqueness check on `field`
    pub fn unique(mut self, field: UniqueField) -> Self {
        self.unique = Some(UniquenessCheck::new(field));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn uniqueness(&self) -> Option<&UniquenessCheck> {
        self.unique.as_ref()
    }

    fn check_syntax(&self, submission: &FormSubmission) -> Result<(), FieldError> {
        self.validators
            .iter()
            .try_for_each(|validator| validator.check(self.name, submission))
    }
}

/// Ordered field declarations of a form
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: &'static str,
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Run the syntactic validators only; uniqueness checks are ignored
    pub fn validate_syntax(&self, submission: &FormSubmission) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for field in &self.fields {
            if let Err(error) = field.check_syntax(submission) {
                outcome.push(field.name, error);
            }
        }

        outcome
    }

    /// Run every field's validators, then its uniqueness check.
    ///
    /// Only store failures are returned as `Err`; every field failure ends
    /// up in the outcome.
    pub async fn validate(
        &self,
        submission: &FormSubmission,
        users: &dyn UserLookup,
        identity: Option<&CurrentIdentity>,
    ) -> Result<ValidationOutcome, DomainError> {
        let mut outcome = ValidationOutcome::default();

        for field in &self.fields {
            if let Err(error) = field.check_syntax(submission) {
                outcome.push(field.name, error);
                continue;
            }

            if let Some(unique) = &field.unique {
                let value = submission.text(field.name).unwrap_or_default();

                if let Some(error) = unique.check(value, users, identity).await? {
                    outcome.push(field.name, error);
                }
            }
        }

        Ok(outcome)
    }
}

/// Result of validating one submission
///
/// Serializes as `{"valid": bool, "errors": {field: [message, ...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: BTreeMap<&'static str, Vec<FieldError>>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, Vec<FieldError>> {
        &self.errors
    }

    /// Errors recorded for `field`, empty when it passed
    pub fn field_errors(&self, field: &str) -> &[FieldError] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Display messages per field
    pub fn messages(&self) -> BTreeMap<&'static str, Vec<String>> {
        self.errors
            .iter()
            .map(|(field, errors)| (*field, errors.iter().map(ToString::to_string).collect()))
            .collect()
    }

    pub fn push(&mut self, field: &'static str, error: FieldError) {
        self.errors.entry(field).or_default().push(error);
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationOutcome", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserLookup;

    fn signup_schema() -> FormSchema {
        FormSchema::new("signup")
            .field(
                FieldSchema::new("email")
                    .validator(Validator::Required)
                    .validator(Validator::Email)
                    .unique(UniqueField::Email),
            )
            .field(
                FieldSchema::new("username")
                    .validator(Validator::Required)
                    .validator(Validator::length(2, 20)),
            )
    }

    #[tokio::test]
    async fn test_short_circuits_within_a_field() {
        let mut users = MockUserLookup::new();
        users.expect_exists().times(0);

        let outcome = signup_schema()
            .validate(&FormSubmission::new().with_value("username", "ab"), &users, None)
            .await
            .unwrap();

        // Required fails first, so neither Email nor the lookup runs
        assert_eq!(outcome.field_errors("email"), &[FieldError::Required]);
        assert!(outcome.field_errors("username").is_empty());
        assert!(!outcome.is_valid());
    }

    #[tokio::test]
    async fn test_reports_every_failing_field() {
        let mut users = MockUserLookup::new();
        users.expect_exists().times(0);

        let submission = FormSubmission::new()
            .with_value("email", "nope")
            .with_value("username", "a");
        let outcome = signup_schema().validate(&submission, &users, None).await.unwrap();

        assert_eq!(outcome.field_errors("email"), &[FieldError::InvalidEmail]);
        assert_eq!(outcome.field_errors("username").len(), 1);
    }

    #[tokio::test]
    async fn test_uniqueness_runs_after_syntax_passes() {
        let mut users = MockUserLookup::new();
        users.expect_exists().times(1).returning(|_, _| Ok(true));

        let submission = FormSubmission::new()
            .with_value("email", "a@x.com")
            .with_value("username", "ab");
        let outcome = signup_schema().validate(&submission, &users, None).await.unwrap();

        assert_eq!(
            outcome.messages().get("email"),
            Some(&vec!["Your email has been registered already!".to_string()])
        );
    }

    #[test]
    fn test_validate_syntax_skips_uniqueness() {
        let submission = FormSubmission::new()
            .with_value("email", "a@x.com")
            .with_value("username", "ab");
        let outcome = signup_schema().validate_syntax(&submission);

        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_outcome_serialization() {
        let mut outcome = ValidationOutcome::default();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"valid": true, "errors": {}})
        );

        outcome.push("picture", FieldError::FileTypeNotAllowed);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"valid": false, "errors": {"picture": ["file type not allowed"]}})
        );
    }
}
