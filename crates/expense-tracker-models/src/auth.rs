//! Registration and login payloads.
//!
//! Both requests check their rules in a fixed order and report only the first
//! failure, so a client always sees a single, stable message.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::users::User;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Registration payload. Missing fields deserialize as empty strings so the
/// "required" rule can report them together.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "password123")]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty()
        {
            return Err(single_error(
                "name",
                "required",
                "Name, email and password are required",
            ));
        }

        if !self.email.validate_email() {
            return Err(single_error("email", "email", "Invalid email format"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(single_error(
                "password",
                "length",
                "Password must be at least 8 characters",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "password123")]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(single_error(
                "email",
                "required",
                "Email and password are required",
            ));
        }

        Ok(())
    }
}

/// Returned by both register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn single_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));

    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}
