// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology provisioning service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::{self, Configuration};
use crate::domain::{
    DatabaseInstanceHandle, NetworkHandle, ParameterGroupHandle, SubnetGroupHandle,
    SubnetIdentifierSet,
};
use crate::engine::ProvisioningEngine;
use crate::errors::ProvisioningResult;
use crate::exports::{self, ExportTable};
use crate::topology::{
    DatabasePlacementBuilder, DatabaseProvisioner, NetworkTopologyBuilder, PlacementPolicy,
};

/// Service layer interface for topology provisioning
#[async_trait]
pub trait TopologyService: Send + Sync {
    /// Declare the full topology for a bound configuration
    async fn provision(&self, config: &Configuration) -> ProvisioningResult<Deployment>;

    /// Bind a raw document, then provision it
    ///
    /// A document that fails to bind issues no engine requests.
    async fn provision_document(&self, raw: &Value) -> ProvisioningResult<Deployment> {
        let config = config::bind(raw)?;
        self.provision(&config).await
    }
}

/// Result of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub network: NetworkHandle,
    pub subnets: SubnetIdentifierSet,
    pub subnet_group: SubnetGroupHandle,
    pub parameter_group: ParameterGroupHandle,
    pub instance: DatabaseInstanceHandle,
    pub exports: ExportTable,
}

/// Handles produced by the stages, before run metadata is attached
struct Stages {
    network: NetworkHandle,
    subnets: SubnetIdentifierSet,
    subnet_group: SubnetGroupHandle,
    parameter_group: ParameterGroupHandle,
    instance: DatabaseInstanceHandle,
    exports: ExportTable,
}

/// Provisioner over one engine
pub struct Provisioner<E> {
    engine: E,
    policy: PlacementPolicy,
}

impl<E: ProvisioningEngine> Provisioner<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            policy: PlacementPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run every stage in dependency order
    ///
    /// The first failing stage ends the run; no partial deployment is
    /// returned.
    pub async fn run(&self, config: &Configuration) -> ProvisioningResult<Deployment> {
        let run_id = Uuid::now_v7();
        let started_at = Utc::now();
        info!(
            "Provisioning run {} on engine {}: {} zones, engine {} {}",
            run_id,
            self.engine.name(),
            config.subnets.len(),
            config.database.engine,
            config.database.engine_version
        );

        let stages = self.run_stages(config).await.map_err(|e| {
            error!("Provisioning run {} failed: {}", run_id, e);
            e
        })?;

        info!(
            "Provisioning run {} complete with {} exports",
            run_id,
            stages.exports.len()
        );

        Ok(Deployment {
            run_id,
            started_at,
            completed_at: Utc::now(),
            network: stages.network,
            subnets: stages.subnets,
            subnet_group: stages.subnet_group,
            parameter_group: stages.parameter_group,
            instance: stages.instance,
            exports: stages.exports,
        })
    }

    /// Bind a raw document and run it
    pub async fn bind_and_run(&self, raw: &Value) -> ProvisioningResult<Deployment> {
        let config = config::bind(raw)?;
        self.run(&config).await
    }

    async fn run_stages(&self, config: &Configuration) -> ProvisioningResult<Stages> {
        let mut exports = ExportTable::new();

        let network_builder = NetworkTopologyBuilder::new(&self.engine, &config.tags);
        let network = network_builder.create_network(&config.network).await?;
        exports.record(exports::NETWORK_ID, network.id.as_str());

        let subnets = network_builder
            .create_subnets(&network, &config.subnets)
            .await?;
        for subnet in subnets.iter() {
            exports.record(exports::subnet_export(&subnet.zone), subnet.id.as_str());
        }

        let placement = DatabasePlacementBuilder::new(&self.engine, &config.tags, self.policy);
        let (subnet_group, parameter_group) = placement.place(&subnets, &config.database).await?;
        exports.record(exports::SUBNET_GROUP, subnet_group.name.as_str());
        exports.record(exports::PARAMETER_GROUP, parameter_group.name.as_str());

        let instance = DatabaseProvisioner::new(&self.engine, &config.tags)
            .create_instance(&config.database, &subnet_group.name, &parameter_group.name)
            .await?;
        exports.record(exports::INSTANCE_ENDPOINT, instance.endpoint.as_str());
        exports.record(exports::INSTANCE_USERNAME, instance.username.as_str());
        exports.record(exports::INSTANCE_PASSWORD, config.database.password.clone());

        Ok(Stages {
            network,
            subnets,
            subnet_group,
            parameter_group,
            instance,
            exports,
        })
    }
}

#[async_trait]
impl<E: ProvisioningEngine> TopologyService for Provisioner<E> {
    async fn provision(&self, config: &Configuration) -> ProvisioningResult<Deployment> {
        self.run(config).await
    }

    async fn provision_document(&self, raw: &Value) -> ProvisioningResult<Deployment> {
        self.bind_and_run(raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use crate::engine::DryRunEngine;
    use crate::errors::ProvisioningError;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "subnets": {
                "eu-central-1a": "10.0.1.0/24",
                "eu-central-1b": "10.0.2.0/24",
                "eu-central-1c": "10.0.3.0/24"
            },
            "database": {
                "allocated_storage": 20,
                "engine": "mysql",
                "engine_version": "5.7",
                "instance_size": "db.t3.micro",
                "username": "admin",
                "password": "secret",
                "skip_final_snapshot": true,
                "max_connections": "100"
            }
        })
    }

    #[tokio::test]
    async fn test_stage_order() {
        let provisioner = Provisioner::new(DryRunEngine::new());
        provisioner.provision_document(&document()).await.unwrap();

        let kinds: Vec<_> = provisioner
            .engine()
            .requests()
            .await
            .iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                ResourceKind::Network,
                ResourceKind::Subnet,
                ResourceKind::Subnet,
                ResourceKind::Subnet,
                ResourceKind::SubnetGroup,
                ResourceKind::ParameterGroup,
                ResourceKind::DatabaseInstance,
            ]
        );
    }

    #[tokio::test]
    async fn test_network_failure_skips_everything_else() {
        let provisioner =
            Provisioner::new(DryRunEngine::new().fail_on(ResourceKind::Network, "quota"));

        let err = provisioner.provision_document(&document()).await.unwrap_err();
        assert!(matches!(
            err,
            ProvisioningError::ResourceCreation {
                kind: ResourceKind::Network,
                ..
            }
        ));
        assert_eq!(provisioner.engine().requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_parameter_group_failure_skips_instance() {
        let provisioner =
            Provisioner::new(DryRunEngine::new().fail_on(ResourceKind::ParameterGroup, "bad family"));

        let err = provisioner.provision_document(&document()).await.unwrap_err();
        assert!(matches!(
            err,
            ProvisioningError::ResourceCreation {
                kind: ResourceKind::ParameterGroup,
                ..
            }
        ));
        assert_eq!(
            provisioner
                .engine()
                .count(ResourceKind::DatabaseInstance)
                .await,
            0
        );
    }

    #[tokio::test]
    async fn test_custom_policy() {
        let mut doc = document();
        doc["subnets"].as_object_mut().unwrap().remove("eu-central-1c");

        let provisioner = Provisioner::new(DryRunEngine::new())
            .with_policy(PlacementPolicy { min_subnets: 2 });
        let deployment = provisioner.provision_document(&doc).await.unwrap();

        assert_eq!(deployment.subnet_group.subnet_ids.len(), 2);
    }
}
