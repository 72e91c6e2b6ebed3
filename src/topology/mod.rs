// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology builders
//!
//! One builder per stage of the resource graph:
//!
//! ```text
//! NetworkTopologyBuilder ──> DatabasePlacementBuilder ──> DatabaseProvisioner
//!   network, subnets[zone]     subnet group ‖ parameter group   instance
//! ```
//!
//! Each builder turns typed settings plus the handles of the previous stage
//! into engine requests, and the engine's answers into new handles.

pub mod database;
pub mod network;
pub mod placement;

use std::collections::BTreeMap;

pub use database::{DatabaseProvisioner, INSTANCE_NAME};
pub use network::{subnet_name, NetworkTopologyBuilder, NETWORK_NAME};
pub use placement::{
    DatabasePlacementBuilder, PlacementPolicy, PARAMETER_GROUP_NAME, SUBNET_GROUP_NAME,
};

/// Tag key holding a resource's display name
pub const NAME_TAG: &str = "Name";

/// Common tags plus a `Name` tag, which always wins
pub(crate) fn tags_with_name(common: &BTreeMap<String, String>, name: &str) -> BTreeMap<String, String> {
    let mut tags = common.clone();
    tags.insert(NAME_TAG.to_string(), name.to_string());
    tags
}
