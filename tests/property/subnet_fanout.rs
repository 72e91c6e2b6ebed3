// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Subnet Fan-out
//!
//! For any set of zones, the run issues one subnet per zone with the
//! configured CIDR, and the subnet group references exactly that set.

use proptest::prelude::*;
use rds_topology::domain::ResourceKind;
use rds_topology::{DryRunEngine, ProvisioningError, Provisioner, TopologyService};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

// ============================================================================
// Generators
// ============================================================================

/// Distinct zone suffixes mapped to distinct /24 blocks inside 10.0.0.0/16
fn zone_layout(min: usize, max: usize) -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_set(0u8..26, min..=max).prop_map(|suffixes| {
        suffixes
            .into_iter()
            .map(|i| {
                let zone = format!("eu-central-1{}", (b'a' + i) as char);
                let cidr = format!("10.0.{}.0/24", u32::from(i) + 1);
                (zone, cidr)
            })
            .collect()
    })
}

fn document(layout: &BTreeMap<String, String>) -> Value {
    let subnets: Map<String, Value> = layout
        .iter()
        .map(|(zone, cidr)| (zone.clone(), json!(cidr)))
        .collect();

    json!({
        "subnets": subnets,
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

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_one_subnet_per_zone(layout in zone_layout(3, 12)) {
        let provisioner = Provisioner::new(DryRunEngine::new());
        let deployment = tokio_test::block_on(provisioner.provision_document(&document(&layout)))
            .unwrap();

        prop_assert_eq!(deployment.subnets.len(), layout.len());
        for subnet in deployment.subnets.iter() {
            prop_assert_eq!(
                Some(&subnet.cidr.to_string()),
                layout.get(subnet.zone.as_str())
            );
        }
        prop_assert_eq!(deployment.subnet_group.subnet_ids, deployment.subnets.ids());
    }

    #[test]
    fn prop_too_few_zones_never_reach_groups(layout in zone_layout(0, 2)) {
        let provisioner = Provisioner::new(DryRunEngine::new());
        let result = tokio_test::block_on(provisioner.provision_document(&document(&layout)));

        let is_insufficient = matches!(
            result,
            Err(ProvisioningError::InsufficientSubnets { required: 3, actual }) if actual == layout.len()
        );
        prop_assert!(is_insufficient);

        let engine = provisioner.engine();
        prop_assert_eq!(tokio_test::block_on(engine.count(ResourceKind::Subnet)), layout.len());
        prop_assert_eq!(tokio_test::block_on(engine.count(ResourceKind::SubnetGroup)), 0);
        prop_assert_eq!(tokio_test::block_on(engine.count(ResourceKind::ParameterGroup)), 0);
    }

    #[test]
    fn prop_request_sequence_is_reproducible(layout in zone_layout(3, 8)) {
        let first = Provisioner::new(DryRunEngine::new());
        let second = Provisioner::new(DryRunEngine::new());

        tokio_test::block_on(first.provision_document(&document(&layout))).unwrap();
        tokio_test::block_on(second.provision_document(&document(&layout))).unwrap();

        prop_assert_eq!(
            tokio_test::block_on(first.engine().requests()),
            tokio_test::block_on(second.engine().requests())
        );
    }
}
