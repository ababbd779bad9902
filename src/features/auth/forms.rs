//! Client-side checks for the register and login forms. They run before any
//! request is built, so a rejected form never reaches the network. Passwords
//! stay wrapped in `SecretString` until the request body is serialized.

use crate::features::auth::types::{LoginRequest, RegisterRequest};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
}

#[derive(Clone, Debug)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// Checks run in a fixed order: required fields, confirmation, length.
    ///
    /// # Errors
    /// The first failing check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let password = self.password.expose_secret();

        if self.name.trim().is_empty() || self.email.trim().is_empty() || password.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        if password != self.confirm_password.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(())
    }

    /// Wire body; the confirmation field is not sent.
    pub fn request(&self) -> RegisterRequest<'_> {
        RegisterRequest {
            name: self.name.trim(),
            email: self.email.trim(),
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// # Errors
    /// `MissingFields` when either field is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.expose_secret().is_empty() {
            Err(ValidationError::MissingFields)
        } else {
            Ok(())
        }
    }

    pub fn request(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: self.email.trim(),
            password: self.password.expose_secret(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_is_rejected() {
        let form = RegisterForm::new("A", "a@x.com", "abc", "abc");
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn mismatch_is_reported_before_length() {
        let form = RegisterForm::new("A", "a@x.com", "abc", "abd");
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn missing_fields_win_over_everything() {
        for form in [
            RegisterForm::new("", "a@x.com", "secret1", "other"),
            RegisterForm::new("A", "   ", "secret1", "secret1"),
            RegisterForm::new("A", "a@x.com", "", ""),
        ] {
            assert_eq!(form.validate(), Err(ValidationError::MissingFields));
        }
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn exactly_minimum_length_passes() {
        let form = RegisterForm::new(" A ", " a@x.com ", "abcdef", "abcdef");
        assert_eq!(form.validate(), Ok(()));

        let request = form.request();
        assert_eq!(request.name, "A");
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.password, "abcdef");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let form = RegisterForm::new("A", "a@x.com", "ñññññ", "ñññññ");
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn debug_output_hides_passwords() {
        let form = RegisterForm::new("A", "a@x.com", "hunter22", "hunter22");
        let rendered = format!("{form:?}");
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("a@x.com", "").validate(),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            LoginForm::new("", "secret").validate(),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(LoginForm::new("a@x.com", "secret").validate(), Ok(()));
    }
}
