// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration document loader
//!
//! Reads a YAML or JSON file and selects one stack's document from it, so a
//! single file can describe several stacks (`dev`, `staging`, ...).

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{ProvisioningError, ProvisioningResult};

/// Default configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default stack key
pub const DEFAULT_STACK: &str = "dev";

/// Loads the raw configuration document for one stack
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    stack: String,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>, stack: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            stack: stack.into(),
        }
    }

    /// Create loader from `RDS_CONFIG` and `RDS_STACK`, falling back to defaults
    pub fn from_env() -> Self {
        let path = std::env::var("RDS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let stack = std::env::var("RDS_STACK").unwrap_or_else(|_| DEFAULT_STACK.to_string());
        Self::new(path, stack)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Read the file and return the stack's document
    pub fn load(&self) -> ProvisioningResult<Value> {
        info!("Loading configuration from {}", self.path.display());

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ProvisioningError::ConfigSource(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let document = parse_document(&self.path, &content)?;
        select_stack(document, &self.stack)
    }
}

fn parse_document(path: &Path, content: &str) -> ProvisioningResult<Value> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

fn select_stack(document: Value, stack: &str) -> ProvisioningResult<Value> {
    match document {
        Value::Object(mut map) => map
            .remove(stack)
            .ok_or_else(|| ProvisioningError::ConfigSource(format!("stack {stack:?} not found"))),
        _ => Err(ProvisioningError::ConfigSource(
            "configuration file must contain a mapping of stacks".to_string(),
        )),
    }
}
