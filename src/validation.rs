//! Field-level acceptance rules applied before a record reaches the store.

use crate::model::Student;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// First rule a candidate record violated; the message is shown to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `id` was zero or absent.
    #[error("Student ID is required")]
    MissingId,
    /// `name` was empty.
    #[error("Student Name is required")]
    MissingName,
    /// `age` was zero or absent.
    #[error("Student Age is required")]
    MissingAge,
    /// `email` was empty.
    #[error("Student Email is required")]
    MissingEmail,
    /// `email` did not look like `local@domain.tld`.
    #[error("Student Email is invalid")]
    InvalidEmail,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").expect("email pattern compiles")
    })
}

/// Syntactic email check; case and surrounding whitespace are ignored.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(&email.trim().to_lowercase())
}

/// Check the rules in order and return the first violation.
pub fn validate_student(student: &Student) -> Result<(), ValidationError> {
    if student.id == 0 {
        return Err(ValidationError::MissingId);
    }
    if student.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if student.age == 0 {
        return Err(ValidationError::MissingAge);
    }
    if student.email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(&student.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
