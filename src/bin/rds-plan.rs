// Copyright (c) 2025 - Cowboy AI, Inc.
//! RDS Topology Planner
//!
//! Loads one stack from the configuration document and runs the full
//! topology against the dry-run engine, printing the issued requests and
//! the resulting exports as JSON.
//!
//! Run with: cargo run --bin rds-plan
//!
//! Environment:
//! - `RDS_CONFIG`: configuration document (default: config.yaml)
//! - `RDS_STACK`: stack to select (default: dev)
//! - `RDS_MIN_SUBNETS`: minimum subnet count (default: 3)

use anyhow::{Context, Result};
use rds_topology::{ConfigLoader, DryRunEngine, PlacementPolicy, Provisioner, TopologyService};
use serde_json::json;
use tracing::info;

fn policy_from_env() -> Result<PlacementPolicy> {
    match std::env::var("RDS_MIN_SUBNETS") {
        Ok(raw) => {
            let min_subnets: usize = raw
                .parse()
                .with_context(|| format!("RDS_MIN_SUBNETS is not a count: {raw}"))?;
            if min_subnets == 0 {
                anyhow::bail!("RDS_MIN_SUBNETS must be at least 1");
            }
            Ok(PlacementPolicy { min_subnets })
        }
        Err(_) => Ok(PlacementPolicy::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let loader = ConfigLoader::from_env();
    let policy = policy_from_env()?;
    info!("Loading configuration:");
    info!("  - Document: {}", loader.path().display());
    info!("  - Stack: {}", loader.stack());
    info!("  - Minimum subnets: {}", policy.min_subnets);

    let document = loader
        .load()
        .with_context(|| format!("Failed to load {}", loader.path().display()))?;
    info!("Configuration loaded");

    let provisioner = Provisioner::new(DryRunEngine::new()).with_policy(policy);
    let deployment = provisioner
        .provision_document(&document)
        .await
        .context("Provisioning failed")?;

    let plan = json!({
        "requests": provisioner.engine().requests().await,
        "deployment": deployment,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("Failed to render plan")?
    );

    Ok(())
}
