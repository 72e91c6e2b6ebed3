// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Domain Models
//!
//! Value objects with validation invariants, the resource taxonomy, and the
//! handles produced as resources are created.
//!
//! # Value Objects with Invariants
//!
//! - [`CidrBlock`] - IPv4 address range in CIDR notation
//! - [`AvailabilityZone`] - zone name, ordered lexically
//! - [`EngineKind`] - database engine family and its rules
//! - [`Secret`] - sensitive value, redacted on output
//!
//! # Handles
//!
//! - [`NetworkHandle`] → [`SubnetHandle`] ([`SubnetIdentifierSet`])
//!   → [`SubnetGroupHandle`] + [`ParameterGroupHandle`]
//!   → [`DatabaseInstanceHandle`]

pub mod database;
pub mod handles;
pub mod invariants;
pub mod network;
pub mod resource_kind;
pub mod secret;

pub use database::EngineKind;
pub use handles::{
    DatabaseInstanceHandle, NetworkHandle, Parameter, ParameterGroupHandle, SubnetGroupHandle,
    SubnetHandle, SubnetIdentifierSet,
};
pub use invariants::{ValidationError, ValidationResult};
pub use network::{AvailabilityZone, CidrBlock, NetworkError};
pub use resource_kind::ResourceKind;
pub use secret::Secret;
