// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network topology: the network container and one subnet per zone

use futures::future::try_join_all;
use std::collections::BTreeMap;
use tracing::info;

use super::tags_with_name;
use crate::config::NetworkSettings;
use crate::domain::{AvailabilityZone, CidrBlock, NetworkHandle, SubnetHandle, SubnetIdentifierSet};
use crate::engine::{create_resource, NetworkArgs, ProvisioningEngine, ResourceArgs, ResourceRequest, SubnetArgs};
use crate::errors::ProvisioningResult;

/// Declared name of the network container
pub const NETWORK_NAME: &str = "vpc";

/// Declared name (and Name tag) of a zone's subnet
pub fn subnet_name(zone: &AvailabilityZone) -> String {
    format!("db-subnet-{zone}")
}

/// Creates the network and fans out subnet creation over zones
pub struct NetworkTopologyBuilder<'a> {
    engine: &'a dyn ProvisioningEngine,
    tags: &'a BTreeMap<String, String>,
}

impl<'a> NetworkTopologyBuilder<'a> {
    pub fn new(engine: &'a dyn ProvisioningEngine, tags: &'a BTreeMap<String, String>) -> Self {
        Self { engine, tags }
    }

    /// Create the network container
    pub async fn create_network(&self, settings: &NetworkSettings) -> ProvisioningResult<NetworkHandle> {
        let request = ResourceRequest::new(
            NETWORK_NAME,
            ResourceArgs::Network(NetworkArgs {
                cidr_block: settings.cidr,
                tags: tags_with_name(self.tags, &settings.name),
            }),
        );

        let created = create_resource(self.engine, request).await?;
        info!("Created network {} ({})", created.id, settings.cidr);

        Ok(NetworkHandle {
            id: created.id,
            cidr: settings.cidr,
        })
    }

    /// Create one subnet in `zone`
    pub async fn create_subnet(
        &self,
        network: &NetworkHandle,
        zone: &AvailabilityZone,
        cidr: CidrBlock,
    ) -> ProvisioningResult<SubnetHandle> {
        let name = subnet_name(zone);
        let request = ResourceRequest::new(
            name.clone(),
            ResourceArgs::Subnet(SubnetArgs {
                vpc_id: network.id.clone(),
                availability_zone: zone.clone(),
                cidr_block: cidr,
                tags: tags_with_name(self.tags, &name),
            }),
        );

        let created = create_resource(self.engine, request).await?;

        Ok(SubnetHandle {
            id: created.id,
            zone: zone.clone(),
            cidr,
            network_id: network.id.clone(),
        })
    }

    /// Create every configured subnet concurrently
    ///
    /// Results keep zone order. The first failure drops the rest of the
    /// fan-out and no partial set is returned.
    pub async fn create_subnets(
        &self,
        network: &NetworkHandle,
        subnets: &BTreeMap<AvailabilityZone, CidrBlock>,
    ) -> ProvisioningResult<SubnetIdentifierSet> {
        let created = try_join_all(
            subnets
                .iter()
                .map(|(zone, cidr)| self.create_subnet(network, zone, *cidr)),
        )
        .await?;

        info!("Created {} subnets in network {}", created.len(), network.id);
        Ok(SubnetIdentifierSet::new(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use crate::engine::DryRunEngine;
    use crate::errors::ProvisioningError;

    fn settings() -> NetworkSettings {
        NetworkSettings {
            name: "vpc-eu-central-1".to_string(),
            cidr: CidrBlock::new("10.0.0.0/16").unwrap(),
        }
    }

    fn zones() -> BTreeMap<AvailabilityZone, CidrBlock> {
        [
            ("eu-central-1b", "10.0.2.0/24"),
            ("eu-central-1a", "10.0.1.0/24"),
            ("eu-central-1c", "10.0.3.0/24"),
        ]
        .into_iter()
        .map(|(zone, cidr)| (AvailabilityZone::new(zone).unwrap(), CidrBlock::new(cidr).unwrap()))
        .collect()
    }

    #[tokio::test]
    async fn test_network_carries_name_tag() {
        let engine = DryRunEngine::new();
        let tags = BTreeMap::new();
        let builder = NetworkTopologyBuilder::new(&engine, &tags);

        let network = builder.create_network(&settings()).await.unwrap();
        assert_eq!(network.id, "vpc-00000001");

        let requests = engine.requests().await;
        let ResourceArgs::Network(args) = &requests[0].args else {
            panic!("expected network request");
        };
        assert_eq!(args.tags.get("Name").map(String::as_str), Some("vpc-eu-central-1"));
        assert_eq!(args.cidr_block.to_string(), "10.0.0.0/16");
    }

    #[tokio::test]
    async fn test_subnets_follow_zone_order() {
        let engine = DryRunEngine::new();
        let tags = BTreeMap::new();
        let builder = NetworkTopologyBuilder::new(&engine, &tags);

        let network = builder.create_network(&settings()).await.unwrap();
        let subnets = builder.create_subnets(&network, &zones()).await.unwrap();

        assert_eq!(subnets.len(), 3);
        let zones: Vec<_> = subnets.iter().map(|s| s.zone.as_str()).collect();
        assert_eq!(zones, ["eu-central-1a", "eu-central-1b", "eu-central-1c"]);
        assert!(subnets.iter().all(|s| s.network_id == network.id));

        let names: Vec<_> = engine
            .requests()
            .await
            .into_iter()
            .filter(|r| r.kind == ResourceKind::Subnet)
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            [
                "db-subnet-eu-central-1a",
                "db-subnet-eu-central-1b",
                "db-subnet-eu-central-1c"
            ]
        );
    }

    #[tokio::test]
    async fn test_subnet_failure_aborts_fan_out() {
        let engine = DryRunEngine::new().fail_on_named(
            ResourceKind::Subnet,
            "db-subnet-eu-central-1b",
            "insufficient capacity",
        );
        let tags = BTreeMap::new();
        let builder = NetworkTopologyBuilder::new(&engine, &tags);

        let network = builder.create_network(&settings()).await.unwrap();
        let err = builder.create_subnets(&network, &zones()).await.unwrap_err();

        match err {
            ProvisioningError::ResourceCreation { kind, name, .. } => {
                assert_eq!(kind, ResourceKind::Subnet);
                assert_eq!(name, "db-subnet-eu-central-1b");
            }
            other => panic!("expected ResourceCreation, got {other:?}"),
        }
    }
}
