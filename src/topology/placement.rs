// Copyright (c) 2025 - Cowboy AI, Inc.
//! Database placement: subnet group and parameter group
//!
//! Both groups depend only on earlier stages, not on each other, so they
//! are issued together once the subnet set passes the minimum-count check.

use std::collections::BTreeMap;
use tracing::info;

use super::tags_with_name;
use crate::config::DatabaseSettings;
use crate::domain::invariants::validate_subnet_count;
use crate::domain::{Parameter, ParameterGroupHandle, SubnetGroupHandle, SubnetIdentifierSet};
use crate::engine::{
    create_resource, ParameterGroupArgs, ProvisioningEngine, ResourceArgs, ResourceRequest,
    SubnetGroupArgs,
};
use crate::errors::{ProvisioningError, ProvisioningResult};

/// Declared name of the database subnet group
pub const SUBNET_GROUP_NAME: &str = "db-subnet-group";

/// Declared name of the database parameter group
pub const PARAMETER_GROUP_NAME: &str = "db-parameter-group";

/// Placement requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPolicy {
    /// Fewest subnets a subnet group may hold, never below one
    pub min_subnets: usize,
}

impl PlacementPolicy {
    /// Three zones for high availability
    pub const DEFAULT_MIN_SUBNETS: usize = 3;

    /// Minimum actually enforced
    pub fn required_subnets(&self) -> usize {
        self.min_subnets.max(1)
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            min_subnets: Self::DEFAULT_MIN_SUBNETS,
        }
    }
}

/// Creates the subnet group and the parameter group
pub struct DatabasePlacementBuilder<'a> {
    engine: &'a dyn ProvisioningEngine,
    tags: &'a BTreeMap<String, String>,
    policy: PlacementPolicy,
}

impl<'a> DatabasePlacementBuilder<'a> {
    pub fn new(
        engine: &'a dyn ProvisioningEngine,
        tags: &'a BTreeMap<String, String>,
        policy: PlacementPolicy,
    ) -> Self {
        Self {
            engine,
            tags,
            policy,
        }
    }

    /// Fail with `InsufficientSubnets` when the set is below the minimum
    pub fn check_subnets(&self, subnets: &SubnetIdentifierSet) -> ProvisioningResult<()> {
        validate_subnet_count(subnets.len(), self.policy.required_subnets())?;
        Ok(())
    }

    /// Create the subnet group referencing every subnet in the set
    pub async fn create_subnet_group(
        &self,
        subnets: &SubnetIdentifierSet,
    ) -> ProvisioningResult<SubnetGroupHandle> {
        self.check_subnets(subnets)?;

        let subnet_ids = subnets.ids();
        let request = ResourceRequest::new(
            SUBNET_GROUP_NAME,
            ResourceArgs::SubnetGroup(SubnetGroupArgs {
                subnet_ids: subnet_ids.clone(),
                tags: tags_with_name(self.tags, SUBNET_GROUP_NAME),
            }),
        );

        let created = create_resource(self.engine, request).await?;
        let name = created.attribute("name").unwrap_or(SUBNET_GROUP_NAME).to_string();
        info!("Created subnet group {} over {} subnets", name, subnet_ids.len());

        Ok(SubnetGroupHandle {
            id: created.id,
            name,
            subnet_ids,
        })
    }

    /// Create the parameter group for the configured engine
    pub async fn create_parameter_group(
        &self,
        settings: &DatabaseSettings,
    ) -> ProvisioningResult<ParameterGroupHandle> {
        let family = settings.parameter_group_family();
        let parameters = parameters_for(settings)?;

        let request = ResourceRequest::new(
            PARAMETER_GROUP_NAME,
            ResourceArgs::ParameterGroup(ParameterGroupArgs {
                family: family.clone(),
                parameters: parameters.clone(),
                tags: self.tags.clone(),
            }),
        );

        let created = create_resource(self.engine, request).await?;
        let name = created
            .attribute("name")
            .unwrap_or(PARAMETER_GROUP_NAME)
            .to_string();
        info!("Created parameter group {} ({})", name, family);

        Ok(ParameterGroupHandle {
            id: created.id,
            name,
            family,
            parameters,
        })
    }

    /// Check the subnet count, then create both groups concurrently
    pub async fn place(
        &self,
        subnets: &SubnetIdentifierSet,
        settings: &DatabaseSettings,
    ) -> ProvisioningResult<(SubnetGroupHandle, ParameterGroupHandle)> {
        self.check_subnets(subnets)?;

        futures::try_join!(
            self.create_subnet_group(subnets),
            self.create_parameter_group(settings)
        )
    }
}

/// Ordered parameter list for the engine
///
/// `character_set_server` (MySQL family only), `max_connections`, then
/// extra parameters by name. An extra parameter reusing a default name
/// replaces the default in place.
pub fn parameters_for(settings: &DatabaseSettings) -> ProvisioningResult<Vec<Parameter>> {
    let mut parameters = Vec::new();

    if settings.engine.is_mysql_family() {
        parameters.push(Parameter::new(
            "character_set_server",
            settings.character_set.as_str(),
        ));
    }
    parameters.push(Parameter::new(
        "max_connections",
        settings.max_connections.as_str(),
    ));

    for (name, value) in &settings.extra_parameters {
        match parameters.iter_mut().find(|p| &p.name == name) {
            Some(existing) => existing.value = value.clone(),
            None => parameters.push(Parameter::new(name.as_str(), value.as_str())),
        }
    }

    if let Some(empty) = parameters.iter().find(|p| p.value.trim().is_empty()) {
        return Err(ProvisioningError::mistyped(
            format!("database.{}", empty.name),
            "a non-empty string",
            "an empty string",
        ));
    }

    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvailabilityZone, CidrBlock, EngineKind, ResourceKind, Secret, SubnetHandle};
    use crate::engine::DryRunEngine;

    fn settings(engine: EngineKind, version: &str) -> DatabaseSettings {
        DatabaseSettings {
            allocated_storage: 20,
            engine,
            engine_version: version.to_string(),
            instance_size: "db.t3.micro".to_string(),
            username: "admin".to_string(),
            password: Secret::new("secret"),
            skip_final_snapshot: true,
            max_connections: "100".to_string(),
            character_set: "utf8".to_string(),
            parameter_group_family: None,
            extra_parameters: BTreeMap::new(),
        }
    }

    fn subnet_set(count: usize) -> SubnetIdentifierSet {
        SubnetIdentifierSet::new(
            (0..count)
                .map(|i| SubnetHandle {
                    id: format!("subnet-{i}"),
                    zone: AvailabilityZone::new(format!("eu-central-1{}", (b'a' + i as u8) as char))
                        .unwrap(),
                    cidr: CidrBlock::new(format!("10.0.{}.0/24", i + 1)).unwrap(),
                    network_id: "vpc-1".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_mysql_parameters() {
        let params = parameters_for(&settings(EngineKind::Mysql, "5.7")).unwrap();
        assert_eq!(
            params,
            vec![
                Parameter::new("character_set_server", "utf8"),
                Parameter::new("max_connections", "100"),
            ]
        );
    }

    #[test]
    fn test_postgres_has_no_character_set() {
        let params = parameters_for(&settings(EngineKind::Postgres, "15.4")).unwrap();
        assert_eq!(params, vec![Parameter::new("max_connections", "100")]);
    }

    #[test]
    fn test_extra_parameters_override_and_append() {
        let mut settings = settings(EngineKind::Mysql, "8.0");
        settings
            .extra_parameters
            .insert("max_connections".to_string(), "500".to_string());
        settings
            .extra_parameters
            .insert("wait_timeout".to_string(), "600".to_string());

        let params = parameters_for(&settings).unwrap();
        assert_eq!(
            params,
            vec![
                Parameter::new("character_set_server", "utf8"),
                Parameter::new("max_connections", "500"),
                Parameter::new("wait_timeout", "600"),
            ]
        );
    }

    #[test]
    fn test_empty_parameter_value_is_type_error() {
        let mut settings = settings(EngineKind::Mysql, "5.7");
        settings.max_connections = String::new();
        assert!(matches!(
            parameters_for(&settings),
            Err(ProvisioningError::ConfigType { field, .. }) if field == "database.max_connections"
        ));
    }

    #[tokio::test]
    async fn test_place_creates_both_groups() {
        let engine = DryRunEngine::new();
        let tags = BTreeMap::new();
        let builder = DatabasePlacementBuilder::new(&engine, &tags, PlacementPolicy::default());

        let (subnet_group, parameter_group) = builder
            .place(&subnet_set(3), &settings(EngineKind::Mysql, "5.7"))
            .await
            .unwrap();

        assert_eq!(subnet_group.name, SUBNET_GROUP_NAME);
        assert_eq!(subnet_group.subnet_ids, ["subnet-0", "subnet-1", "subnet-2"]);
        assert_eq!(parameter_group.name, PARAMETER_GROUP_NAME);
        assert_eq!(parameter_group.family, "mysql5.7");
    }

    #[tokio::test]
    async fn test_insufficient_subnets_issue_no_requests() {
        let engine = DryRunEngine::new();
        let tags = BTreeMap::new();
        let builder = DatabasePlacementBuilder::new(&engine, &tags, PlacementPolicy::default());

        let err = builder
            .place(&subnet_set(2), &settings(EngineKind::Mysql, "5.7"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProvisioningError::InsufficientSubnets {
                required: 3,
                actual: 2
            }
        ));
        assert_eq!(engine.count(ResourceKind::SubnetGroup).await, 0);
        assert_eq!(engine.count(ResourceKind::ParameterGroup).await, 0);
    }

    #[tokio::test]
    async fn test_policy_minimum_is_configurable() {
        let engine = DryRunEngine::new();
        let tags = BTreeMap::new();
        let builder =
            DatabasePlacementBuilder::new(&engine, &tags, PlacementPolicy { min_subnets: 2 });

        let group = builder.create_subnet_group(&subnet_set(2)).await.unwrap();
        assert_eq!(group.subnet_ids.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_minimum_still_requires_one_subnet() {
        let engine = DryRunEngine::new();
        let tags = BTreeMap::new();
        let builder =
            DatabasePlacementBuilder::new(&engine, &tags, PlacementPolicy { min_subnets: 0 });

        let err = builder
            .place(&subnet_set(0), &settings(EngineKind::Mysql, "5.7"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProvisioningError::InsufficientSubnets {
                required: 1,
                actual: 0
            }
        ));
        assert_eq!(engine.count(ResourceKind::SubnetGroup).await, 0);
    }
}
