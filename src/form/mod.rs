//! Login form controller
//!
//! Owns the two field values, their error slots and the submit lifecycle:
//! Idle -> Validating -> (Idle with errors | Submitting -> Success -> Idle).

pub mod validation;

use std::fmt;

use crate::auth::{AuthError, AuthSuccess};

pub use validation::{FieldErrors, RequiredFieldError};

pub const SUBMIT_LABEL: &str = "Log in";
pub const SUBMITTING_LABEL: &str = "Logging in...";
pub const SIGN_UP_MESSAGE: &str = "Navigate to Sign Up page (mock).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Username, Field::Password];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Username => write!(f, "Username"),
            Field::Password => write!(f, "Password"),
        }
    }
}

/// Field values for one login attempt. Lives only in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginAttempt {
    pub username: String,
    pub password: String,
}

impl LoginAttempt {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
}

/// Result of the first half of a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// A submission is already in flight; nothing changed
    AlreadySubmitting,
    /// Validation failed; errors are attached to the form
    Invalid(FieldErrors),
    /// Validation passed; the snapshot is ready for the authenticator
    Started(LoginAttempt),
}

/// Message shown to the user as a modal (and optionally a desktop notification)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    values: LoginAttempt,
    errors: FieldErrors,
    phase: SubmitPhase,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn error(&self, field: Field) -> Option<&RequiredFieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Overwrite a field. Validation waits for submit (or blur).
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        *self.values.get_mut(field) = value.into();
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.values.get_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: Field) {
        self.values.get_mut(field).pop();
    }

    /// Re-check one field, touching only its own error slot
    pub fn validate_field(&mut self, field: Field) -> Option<RequiredFieldError> {
        match validation::validate_field(&self.values, field) {
            Some(err) => {
                self.errors.insert(field, err);
                Some(err)
            }
            None => {
                self.errors.remove(&field);
                None
            }
        }
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_submitting() {
            tracing::debug!("Submit ignored, already submitting");
            return SubmitStart::AlreadySubmitting;
        }

        self.phase = SubmitPhase::Validating;
        let errors = validation::validate(&self.values);
        self.errors = errors.clone();

        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "Login form failed validation");
            self.phase = SubmitPhase::Idle;
            return SubmitStart::Invalid(errors);
        }

        self.phase = SubmitPhase::Submitting;
        SubmitStart::Started(self.values.clone())
    }

    pub fn finish_submit(&mut self, outcome: Result<AuthSuccess, AuthError>) -> Notice {
        match outcome {
            Ok(success) => {
                self.phase = SubmitPhase::Success;
                tracing::info!(username = %success.username, "Login succeeded");
                let notice = Notice::new(
                    "Logged in",
                    format!("Mock login successful for username: {}", success.username),
                );
                self.reset();
                notice
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.phase = SubmitPhase::Idle;
                Notice::new("Login failed", e.to_string())
            }
        }
    }

    /// The "sign up" link. Reports only; form state is untouched.
    pub fn activate_sign_up(&self) -> Notice {
        tracing::info!("Sign up link clicked");
        Notice::new("Sign up", SIGN_UP_MESSAGE)
    }

    fn reset(&mut self) {
        self.values = LoginAttempt::default();
        self.errors.clear();
        self.phase = SubmitPhase::Idle;
    }
}
