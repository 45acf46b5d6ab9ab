//! Typed login/registration forms and their field-level validation.
//!
//! Validation never panics or short-circuits: every failing field contributes a
//! [`FieldError`] so the UI can annotate all of them at once.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_FULL_NAME_LEN: usize = 2;

pub const MSG_INVALID_EMAIL: &str = "Пожалуйста, введите корректный email адрес";
pub const MSG_EMPTY_PASSWORD: &str = "Пароль не может быть пустым";
pub const MSG_SHORT_PASSWORD: &str = "Пароль должен содержать минимум 8 символов";
pub const MSG_SHORT_NAME: &str = "Имя должно содержать минимум 2 символа";
pub const MSG_PASSWORD_MISMATCH: &str = "Пароли не совпадают";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} invalid field(s)", .0.len())]
/// Non-empty list of field failures produced by a form validator.
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First message attached to `field`, if any.
    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: FormField) -> bool {
        self.message_for(field).is_some()
    }
}

#[derive(Default)]
struct ErrorCollector(Vec<FieldError>);

impl ErrorCollector {
    fn check(&mut self, ok: bool, field: FormField, message: &str) {
        if !ok {
            self.0.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Returns `true` for a syntactically plausible address.
///
/// Local parts may not start with a dot or contain consecutive dots.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && email_pattern().is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Login input that passed validation. The password is dropped; the mock never checks it.
pub struct LoginCredentials {
    pub email: String,
    pub remember_me: bool,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns every failing field when the email is malformed or the password is empty.
    pub fn validate(&self) -> Result<LoginCredentials, ValidationErrors> {
        let mut errors = ErrorCollector::default();
        errors.check(is_valid_email(&self.email), FormField::Email, MSG_INVALID_EMAIL);
        errors.check(
            !self.password.is_empty(),
            FormField::Password,
            MSG_EMPTY_PASSWORD,
        );
        errors.finish(LoginCredentials {
            email: self.email.clone(),
            remember_me: self.remember_me,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
}

impl RegistrationForm {
    /// # Errors
    ///
    /// Returns every failing field: short name, malformed email, short password, and a
    /// `confirmPassword` error when the two passwords differ.
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ErrorCollector::default();
        errors.check(
            self.full_name.chars().count() >= MIN_FULL_NAME_LEN,
            FormField::FullName,
            MSG_SHORT_NAME,
        );
        errors.check(is_valid_email(&self.email), FormField::Email, MSG_INVALID_EMAIL);
        errors.check(
            self.password.chars().count() >= MIN_PASSWORD_LEN,
            FormField::Password,
            MSG_SHORT_PASSWORD,
        );
        errors.check(
            self.password == self.confirm_password,
            FormField::ConfirmPassword,
            MSG_PASSWORD_MISMATCH,
        );
        errors.finish(Registration {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        })
    }
}
