// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Placement and Credential Invariants
//!
//! All functions are pure (no side effects) and return detailed validation
//! results. Callers convert failures into [`ProvisioningError`] at the stage
//! boundary.
//!
//! # Invariant Categories
//!
//! 1. **Placement**: a subnet group needs a minimum number of subnets
//! 2. **Credentials**: usernames and passwords must satisfy engine policy

use crate::domain::EngineKind;
use crate::errors::ProvisioningError;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not enough subnets to spread a database across zones
    #[error("At least {required} subnets required, got {actual}")]
    InsufficientSubnets { required: usize, actual: usize },

    /// Username is reserved by the engine
    #[error("Username {username:?} is reserved by {engine}")]
    ReservedUsername { username: String, engine: String },

    /// Username violates the engine's format rules
    #[error("Username {username:?} is invalid: {reason}")]
    InvalidUsername { username: String, reason: String },

    /// Password violates the engine's format rules
    #[error("Password is invalid: {0}")]
    InvalidPassword(String),
}

impl From<ValidationError> for ProvisioningError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InsufficientSubnets { required, actual } => {
                ProvisioningError::InsufficientSubnets { required, actual }
            }
            other => ProvisioningError::InvalidCredential(other.to_string()),
        }
    }
}

/// Longest password accepted
pub const MAX_PASSWORD_LEN: usize = 128;

const FORBIDDEN_PASSWORD_CHARS: &[char] = &['/', '"', '@', ' '];

/// Validate a subnet set is large enough for placement
///
/// # Rules
/// - `actual >= required`; the set is never truncated or padded
pub fn validate_subnet_count(actual: usize, required: usize) -> ValidationResult {
    if actual < required {
        return Err(ValidationError::InsufficientSubnets { required, actual });
    }
    Ok(())
}

/// Validate a master username against engine policy
///
/// # Rules
/// - 1 to `engine.max_username_len()` characters
/// - First character is an ASCII letter
/// - Remaining characters are ASCII alphanumeric or `_`
/// - Not a reserved account name (case-insensitive)
pub fn validate_username(engine: &EngineKind, username: &str) -> ValidationResult {
    let invalid = |reason: String| ValidationError::InvalidUsername {
        username: username.to_string(),
        reason,
    };

    if engine
        .reserved_usernames()
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(username))
    {
        return Err(ValidationError::ReservedUsername {
            username: username.to_string(),
            engine: engine.to_string(),
        });
    }

    let max = engine.max_username_len();
    let len = username.chars().count();
    if len == 0 || len > max {
        return Err(invalid(format!("must be 1 to {max} characters")));
    }

    let mut chars = username.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with a letter".to_string()));
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            "may only contain letters, digits and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Validate a master password
///
/// # Rules
/// - 1 to [`MAX_PASSWORD_LEN`] printable ASCII characters
/// - None of `/`, `"`, `@` or space
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "must not be empty".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_LEN {
        return Err(ValidationError::InvalidPassword(format!(
            "must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }

    if let Some(c) = password.chars().find(|c| FORBIDDEN_PASSWORD_CHARS.contains(c)) {
        return Err(ValidationError::InvalidPassword(format!(
            "must not contain {c:?}"
        )));
    }

    if !password.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::InvalidPassword(
            "must only contain printable ASCII characters".to_string(),
        ));
    }

    Ok(())
}
