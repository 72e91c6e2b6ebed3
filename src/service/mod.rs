// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Topology Provisioning
//!
//! Drives the builders in dependency order against one provisioning engine
//! and collects the results into a [`Deployment`].
//!
//! # Architecture
//!
//! ```text
//! Raw document
//!     ↓  config::bind (pure, no engine calls on failure)
//! Configuration
//!     ↓
//! NetworkTopologyBuilder   network → subnets[zone] (concurrent)
//!     ↓  minimum subnet count
//! DatabasePlacementBuilder subnet group ‖ parameter group
//!     ↓  credential policy
//! DatabaseProvisioner      instance
//!     ↓
//! Deployment + ExportTable
//! ```
//!
//! # Failure Semantics
//!
//! Every stage returns its error immediately. Dependent requests are never
//! issued and already-issued ones are not rolled back; that belongs to the
//! engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use rds_topology::engine::DryRunEngine;
//! use rds_topology::service::{Provisioner, TopologyService};
//!
//! # async fn example(document: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
//! let provisioner = Provisioner::new(DryRunEngine::new());
//! let deployment = provisioner.provision_document(&document).await?;
//!
//! for (name, value) in deployment.exports.iter() {
//!     println!("{name} = {value}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod provisioner;

pub use provisioner::{Deployment, Provisioner, TopologyService};
