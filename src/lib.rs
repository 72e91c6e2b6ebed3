//! Network and managed-database topology declaration
//!
//! Binds a per-stack configuration document and declares, against a
//! provisioning engine, a private network with one subnet per zone, a
//! database subnet group, a parameter group and one database instance.
//! Identifiers and the instance endpoint are published as named exports.

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod exports;
pub mod service;
pub mod topology;

// Re-export commonly used types
pub use config::{Configuration, ConfigLoader, DatabaseSettings, NetworkSettings};
pub use engine::{CreatedResource, DryRunEngine, EngineError, ProvisioningEngine, ResourceRequest};
pub use errors::{ProvisioningError, ProvisioningResult};
pub use exports::{ExportTable, ExportValue};
pub use service::{Deployment, Provisioner, TopologyService};
pub use topology::PlacementPolicy;
