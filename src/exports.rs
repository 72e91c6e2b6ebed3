// Copyright (c) 2025 - Cowboy AI, Inc.
//! Export Registry
//!
//! Named output values published for downstream consumers. Each stage
//! records its outputs as soon as they exist; names must be unique per
//! value, so an overwrite is logged as a warning.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use crate::domain::{AvailabilityZone, Secret};

/// Export name of the network identifier
pub const NETWORK_ID: &str = "vpc-id";
/// Export name of the subnet group name
pub const SUBNET_GROUP: &str = "db-subnet-group";
/// Export name of the parameter group name
pub const PARAMETER_GROUP: &str = "db-parameter-group";
/// Export name of the instance endpoint
pub const INSTANCE_ENDPOINT: &str = "db-instance-endpoint";
/// Export name of the master username
pub const INSTANCE_USERNAME: &str = "db-instance-username";
/// Export name of the master password (sensitive)
pub const INSTANCE_PASSWORD: &str = "db-instance-password";

/// Export name of a zone's subnet identifier
///
/// The `subnet-` prefix keeps zone-derived names apart from the fixed ones.
pub fn subnet_export(zone: &AvailabilityZone) -> String {
    format!("subnet-{zone}-id")
}

/// An exported value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportValue {
    Plain(String),
    /// Redacted wherever it is printed or serialized
    Secret(Secret),
}

impl ExportValue {
    pub fn is_sensitive(&self) -> bool {
        matches!(self, ExportValue::Secret(_))
    }

    /// Plain value, `None` for secrets
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            ExportValue::Plain(value) => Some(value),
            ExportValue::Secret(_) => None,
        }
    }
}

impl fmt::Display for ExportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportValue::Plain(value) => f.write_str(value),
            ExportValue::Secret(secret) => write!(f, "{secret}"),
        }
    }
}

impl From<String> for ExportValue {
    fn from(value: String) -> Self {
        ExportValue::Plain(value)
    }
}

impl From<&str> for ExportValue {
    fn from(value: &str) -> Self {
        ExportValue::Plain(value.to_string())
    }
}

impl From<Secret> for ExportValue {
    fn from(value: Secret) -> Self {
        ExportValue::Secret(value)
    }
}

/// Export name → value, iterated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExportTable(BTreeMap<String, ExportValue>);

impl ExportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an export, returning the previous value
    pub fn record(&mut self, name: impl Into<String>, value: impl Into<ExportValue>) -> Option<ExportValue> {
        let name = name.into();
        let value = value.into();

        debug!("Recording export {} = {}", name, value);
        let previous = self.0.insert(name.clone(), value);
        if previous.is_some() {
            warn!("Export {} overwritten", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&ExportValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}
