// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Kind Taxonomy
//!
//! The closed set of resource kinds this crate declares to a provisioning
//! engine, in dependency order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource declared to the provisioning engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Virtual network container
    Network,
    /// Zone-scoped subnet inside the network
    Subnet,
    /// Named set of subnets used for database placement
    SubnetGroup,
    /// Named set of database engine parameters
    ParameterGroup,
    /// Managed database instance
    DatabaseInstance,
}

impl ResourceKind {
    /// All kinds in dependency order
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Network,
        ResourceKind::Subnet,
        ResourceKind::SubnetGroup,
        ResourceKind::ParameterGroup,
        ResourceKind::DatabaseInstance,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::Subnet => "subnet",
            ResourceKind::SubnetGroup => "subnet group",
            ResourceKind::ParameterGroup => "parameter group",
            ResourceKind::DatabaseInstance => "database instance",
        }
    }

    /// Identifier prefix used by engines that synthesise ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Network => "vpc",
            ResourceKind::Subnet => "subnet",
            ResourceKind::SubnetGroup => "dbsubnet",
            ResourceKind::ParameterGroup => "dbparam",
            ResourceKind::DatabaseInstance => "db",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
