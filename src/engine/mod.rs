// Copyright (c) 2025 - Cowboy AI, Inc.

//! Provisioning Engine - the external collaborator boundary
//!
//! This crate only *declares* resources. Turning a declaration into cloud
//! API calls (state diffing, convergence, credentials, retries) belongs to
//! an engine behind the [`ProvisioningEngine`] trait.
//!
//! # Contract
//!
//! ```text
//! create(kind, name, args) ──> (id + engine-assigned attributes) | EngineError
//! ```
//!
//! Each [`ResourceRequest`] carries exactly the arguments of its kind. The
//! returned [`CreatedResource`] exposes the identifier plus any attributes
//! the engine assigned (group names, instance endpoint).
//!
//! # Example Implementation
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use rds_topology::engine::{CreatedResource, EngineError, ProvisioningEngine, ResourceRequest};
//!
//! struct NullEngine;
//!
//! #[async_trait]
//! impl ProvisioningEngine for NullEngine {
//!     async fn create(&self, request: ResourceRequest) -> Result<CreatedResource, EngineError> {
//!         Ok(CreatedResource::new(format!("{}-0", request.kind.id_prefix())))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "null"
//!     }
//! }
//! ```

pub mod dry_run;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error};

use crate::domain::{AvailabilityZone, CidrBlock, Parameter, ResourceKind, Secret};
use crate::errors::{ProvisioningError, ProvisioningResult};

pub use dry_run::DryRunEngine;

/// Provisioning engine trait
///
/// Implementations must be safe to call concurrently: independent branches
/// of the resource graph (subnets, groups) are issued together.
#[async_trait]
pub trait ProvisioningEngine: Send + Sync {
    /// Declare one resource and wait for its identifier
    async fn create(&self, request: ResourceRequest) -> Result<CreatedResource, EngineError>;

    /// Get the name of this engine
    fn name(&self) -> &str;
}

/// Errors reported by a provisioning engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine or cloud provider refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The engine could not be reached
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// The engine did not report an attribute this crate depends on
    #[error("missing attribute {0:?} in engine response")]
    MissingAttribute(String),
}

/// A single resource-creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRequest {
    pub kind: ResourceKind,
    pub name: String,
    pub args: ResourceArgs,
}

impl ResourceRequest {
    pub fn new(name: impl Into<String>, args: ResourceArgs) -> Self {
        Self {
            kind: args.kind(),
            name: name.into(),
            args,
        }
    }
}

/// Typed arguments, one variant per resource kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceArgs {
    Network(NetworkArgs),
    Subnet(SubnetArgs),
    SubnetGroup(SubnetGroupArgs),
    ParameterGroup(ParameterGroupArgs),
    DatabaseInstance(InstanceArgs),
}

impl ResourceArgs {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceArgs::Network(_) => ResourceKind::Network,
            ResourceArgs::Subnet(_) => ResourceKind::Subnet,
            ResourceArgs::SubnetGroup(_) => ResourceKind::SubnetGroup,
            ResourceArgs::ParameterGroup(_) => ResourceKind::ParameterGroup,
            ResourceArgs::DatabaseInstance(_) => ResourceKind::DatabaseInstance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkArgs {
    pub cidr_block: CidrBlock,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubnetArgs {
    pub vpc_id: String,
    pub availability_zone: AvailabilityZone,
    pub cidr_block: CidrBlock,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubnetGroupArgs {
    pub subnet_ids: Vec<String>,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterGroupArgs {
    pub family: String,
    pub parameters: Vec<Parameter>,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceArgs {
    pub allocated_storage: u32,
    pub engine: String,
    pub engine_version: String,
    pub instance_class: String,
    pub db_subnet_group_name: String,
    pub parameter_group_name: String,
    pub password: Secret,
    pub skip_final_snapshot: bool,
    pub username: String,
    pub tags: BTreeMap<String, String>,
}

/// Engine response for a created resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatedResource {
    pub id: String,
    pub attributes: BTreeMap<String, String>,
}

impl CreatedResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn require_attribute(&self, name: &str) -> Result<&str, EngineError> {
        self.attribute(name)
            .ok_or_else(|| EngineError::MissingAttribute(name.to_string()))
    }
}

/// Issue a request, mapping engine failures to `ResourceCreation`
pub(crate) async fn create_resource(
    engine: &dyn ProvisioningEngine,
    request: ResourceRequest,
) -> ProvisioningResult<CreatedResource> {
    let kind = request.kind;
    let name = request.name.clone();

    debug!("Requesting {} '{}' from engine {}", kind, name, engine.name());

    engine.create(request).await.map_err(|source| {
        error!("Engine {} failed to create {} '{}': {}", engine.name(), kind, name, source);
        ProvisioningError::ResourceCreation { kind, name, source }
    })
}
