// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for rds-topology
//!
//! Configuration documents shared by the integration tests. Every document
//! is built from fixed values so request sequences are reproducible.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const ZONE_A: &str = "eu-central-1a";
pub const ZONE_B: &str = "eu-central-1b";
pub const ZONE_C: &str = "eu-central-1c";

/// The three-zone MySQL 5.7 stack
pub fn eu_central_document() -> Value {
    json!({
        "active": true,
        "subnets": {
            ZONE_A: "10.0.1.0/24",
            ZONE_B: "10.0.2.0/24",
            ZONE_C: "10.0.3.0/24"
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

/// The same stack with one database field replaced
pub fn with_database_field(field: &str, value: Value) -> Value {
    let mut document = eu_central_document();
    document["database"][field] = value;
    document
}

/// The same stack with one database field removed
pub fn without_database_field(field: &str) -> Value {
    let mut document = eu_central_document();
    if let Some(database) = document["database"].as_object_mut() {
        database.remove(field);
    }
    document
}

/// The same stack restricted to the given zones
pub fn with_zones(zones: &[&str]) -> Value {
    let mut document = eu_central_document();
    let subnets: serde_json::Map<String, Value> = zones
        .iter()
        .enumerate()
        .map(|(i, zone)| (zone.to_string(), json!(format!("10.0.{}.0/24", i + 1))))
        .collect();
    document["subnets"] = Value::Object(subnets);
    document
}
