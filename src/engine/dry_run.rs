// Copyright (c) 2025 - Cowboy AI, Inc.

//! Dry-run Provisioning Engine
//!
//! Records every request in issue order and answers with synthetic,
//! deterministic identifiers instead of calling a cloud provider:
//!
//! ```text
//! network          → vpc-00000001
//! subnet           → subnet-00000002         (and so on, one sequence)
//! subnet group     → dbsubnet-…   name = <declared name>
//! parameter group  → dbparam-…    name = <declared name>
//! instance         → db-…         endpoint = <name>.<id>.dry-run.internal:<port>
//! ```
//!
//! Failures can be injected per kind (optionally per name) to exercise the
//! error paths of the pipeline. A failing request is still recorded.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CreatedResource, EngineError, ProvisioningEngine, ResourceArgs, ResourceRequest};
use crate::domain::{EngineKind, ResourceKind};

#[derive(Debug, Clone)]
struct FailureRule {
    kind: ResourceKind,
    name: Option<String>,
    message: String,
}

impl FailureRule {
    fn matches(&self, request: &ResourceRequest) -> bool {
        self.kind == request.kind && self.name.as_ref().map_or(true, |name| name == &request.name)
    }
}

#[derive(Debug, Default)]
struct DryRunState {
    sequence: u64,
    requests: Vec<ResourceRequest>,
}

/// In-memory engine that records requests
#[derive(Debug, Default)]
pub struct DryRunEngine {
    state: Mutex<DryRunState>,
    failures: Vec<FailureRule>,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every request of `kind`
    pub fn fail_on(mut self, kind: ResourceKind, message: impl Into<String>) -> Self {
        self.failures.push(FailureRule {
            kind,
            name: None,
            message: message.into(),
        });
        self
    }

    /// Reject the request of `kind` declared as `name`
    pub fn fail_on_named(
        mut self,
        kind: ResourceKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failures.push(FailureRule {
            kind,
            name: Some(name.into()),
            message: message.into(),
        });
        self
    }

    /// All requests received, in issue order
    pub async fn requests(&self) -> Vec<ResourceRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Number of requests received for `kind`
    pub async fn count(&self, kind: ResourceKind) -> usize {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .filter(|request| request.kind == kind)
            .count()
    }

    fn respond(request: &ResourceRequest, id: String) -> CreatedResource {
        let created = CreatedResource::new(id.clone());

        match &request.args {
            ResourceArgs::Network(args) => {
                created.with_attribute("cidr_block", args.cidr_block.to_string())
            }
            ResourceArgs::Subnet(args) => {
                created.with_attribute("availability_zone", args.availability_zone.as_str())
            }
            ResourceArgs::SubnetGroup(_) | ResourceArgs::ParameterGroup(_) => {
                created.with_attribute("name", request.name.as_str())
            }
            ResourceArgs::DatabaseInstance(args) => {
                let port = EngineKind::parse(&args.engine).default_port();
                created
                    .with_attribute(
                        "endpoint",
                        format!("{}.{}.dry-run.internal:{}", request.name, id, port),
                    )
                    .with_attribute("port", port.to_string())
            }
        }
    }
}

#[async_trait]
impl ProvisioningEngine for DryRunEngine {
    async fn create(&self, request: ResourceRequest) -> Result<CreatedResource, EngineError> {
        let mut state = self.state.lock().await;
        state.requests.push(request.clone());

        if let Some(rule) = self.failures.iter().find(|rule| rule.matches(&request)) {
            return Err(EngineError::Rejected(rule.message.clone()));
        }

        state.sequence += 1;
        let id = format!("{}-{:08x}", request.kind.id_prefix(), state.sequence);
        debug!("Dry run created {} '{}' as {}", request.kind, request.name, id);

        Ok(Self::respond(&request, id))
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
