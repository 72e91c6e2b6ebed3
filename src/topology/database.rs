// Copyright (c) 2025 - Cowboy AI, Inc.
//! Database instance provisioning

use std::collections::BTreeMap;
use tracing::info;

use super::tags_with_name;
use crate::config::DatabaseSettings;
use crate::domain::invariants::{validate_password, validate_username};
use crate::domain::{DatabaseInstanceHandle, ResourceKind};
use crate::engine::{create_resource, InstanceArgs, ProvisioningEngine, ResourceArgs, ResourceRequest};
use crate::errors::{ProvisioningError, ProvisioningResult};

/// Declared name of the database instance
pub const INSTANCE_NAME: &str = "db-instance";

/// Creates the database instance
pub struct DatabaseProvisioner<'a> {
    engine: &'a dyn ProvisioningEngine,
    tags: &'a BTreeMap<String, String>,
}

impl<'a> DatabaseProvisioner<'a> {
    pub fn new(engine: &'a dyn ProvisioningEngine, tags: &'a BTreeMap<String, String>) -> Self {
        Self { engine, tags }
    }

    /// Check username and password against engine policy
    pub fn check_credentials(&self, settings: &DatabaseSettings) -> ProvisioningResult<()> {
        validate_username(&settings.engine, &settings.username)?;
        validate_password(settings.password.expose())?;
        Ok(())
    }

    /// Create the instance inside the named groups
    ///
    /// Credentials are checked before the request is issued; no retry is
    /// attempted on engine failure.
    pub async fn create_instance(
        &self,
        settings: &DatabaseSettings,
        subnet_group_name: &str,
        parameter_group_name: &str,
    ) -> ProvisioningResult<DatabaseInstanceHandle> {
        self.check_credentials(settings)?;

        let request = ResourceRequest::new(
            INSTANCE_NAME,
            ResourceArgs::DatabaseInstance(InstanceArgs {
                allocated_storage: settings.allocated_storage,
                engine: settings.engine.to_string(),
                engine_version: settings.engine_version.clone(),
                instance_class: settings.instance_size.clone(),
                db_subnet_group_name: subnet_group_name.to_string(),
                parameter_group_name: parameter_group_name.to_string(),
                password: settings.password.clone(),
                skip_final_snapshot: settings.skip_final_snapshot,
                username: settings.username.clone(),
                tags: tags_with_name(self.tags, INSTANCE_NAME),
            }),
        );

        let created = create_resource(self.engine, request).await?;
        let endpoint = created
            .require_attribute("endpoint")
            .map_err(|source| ProvisioningError::ResourceCreation {
                kind: ResourceKind::DatabaseInstance,
                name: INSTANCE_NAME.to_string(),
                source,
            })?
            .to_string();

        info!("Created database instance {} at {}", created.id, endpoint);

        Ok(DatabaseInstanceHandle {
            id: created.id,
            endpoint,
            username: settings.username.clone(),
            subnet_group_name: subnet_group_name.to_string(),
            parameter_group_name: parameter_group_name.to_string(),
        })
    }
}
