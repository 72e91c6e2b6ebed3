//! Error types for topology provisioning

use thiserror::Error;

use crate::domain::ResourceKind;
use crate::engine::EngineError;

/// Errors that can occur while binding configuration or declaring resources
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Required field absent from the configuration document
    #[error("Missing required configuration field: {field}")]
    ConfigBinding { field: String },

    /// Field present but not coercible to its declared type
    #[error("Configuration field {field} must be {expected}, found {found}")]
    ConfigType {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// Fewer subnets than database placement requires
    #[error("Database placement requires at least {required} subnets, got {actual}")]
    InsufficientSubnets { required: usize, actual: usize },

    /// Username or password rejected by engine policy
    #[error("Invalid database credential: {0}")]
    InvalidCredential(String),

    /// The provisioning engine failed to create a resource
    #[error("Failed to create {kind} '{name}': {source}")]
    ResourceCreation {
        kind: ResourceKind,
        name: String,
        #[source]
        source: EngineError,
    },

    /// Configuration document could not be read or located
    #[error("Configuration source error: {0}")]
    ConfigSource(String),
}

impl ProvisioningError {
    /// Build a `ConfigBinding` error for a field path
    pub fn missing(field: impl Into<String>) -> Self {
        ProvisioningError::ConfigBinding {
            field: field.into(),
        }
    }

    /// Build a `ConfigType` error for a field path
    pub fn mistyped(field: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        ProvisioningError::ConfigType {
            field: field.into(),
            expected,
            found: found.into(),
        }
    }

    /// True when the error was raised before any resource request could be issued
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ProvisioningError::ConfigBinding { .. }
                | ProvisioningError::ConfigType { .. }
                | ProvisioningError::ConfigSource(_)
        )
    }
}

/// Result type for provisioning operations
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

impl From<serde_json::Error> for ProvisioningError {
    fn from(err: serde_json::Error) -> Self {
        ProvisioningError::ConfigSource(err.to_string())
    }
}

impl From<serde_yaml::Error> for ProvisioningError {
    fn from(err: serde_yaml::Error) -> Self {
        ProvisioningError::ConfigSource(err.to_string())
    }
}
