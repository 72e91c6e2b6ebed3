// Copyright (c) 2025 - Cowboy AI, Inc.
//! Handles to created resources
//!
//! Each handle is produced once by a builder stage and is immutable
//! afterwards. Later stages hold references, never ownership of the
//! resources themselves.

use serde::Serialize;

use crate::domain::{AvailabilityZone, CidrBlock};

/// Created network container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkHandle {
    pub id: String,
    pub cidr: CidrBlock,
}

/// Created zone-scoped subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetHandle {
    pub id: String,
    pub zone: AvailabilityZone,
    pub cidr: CidrBlock,
    pub network_id: String,
}

/// Subnets in fan-out order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubnetIdentifierSet(Vec<SubnetHandle>);

impl SubnetIdentifierSet {
    pub fn new(subnets: Vec<SubnetHandle>) -> Self {
        Self(subnets)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Subnet identifiers in order
    pub fn ids(&self) -> Vec<String> {
        self.0.iter().map(|subnet| subnet.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubnetHandle> {
        self.0.iter()
    }

    /// Find the subnet created for a zone
    pub fn for_zone(&self, zone: &AvailabilityZone) -> Option<&SubnetHandle> {
        self.0.iter().find(|subnet| &subnet.zone == zone)
    }
}

/// Created database subnet group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetGroupHandle {
    pub id: String,
    pub name: String,
    pub subnet_ids: Vec<String>,
}

/// One engine parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Created database parameter group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterGroupHandle {
    pub id: String,
    pub name: String,
    pub family: String,
    pub parameters: Vec<Parameter>,
}

/// Created database instance
///
/// References its subnet group and parameter group by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInstanceHandle {
    pub id: String,
    pub endpoint: String,
    pub username: String,
    pub subnet_group_name: String,
    pub parameter_group_name: String,
}
