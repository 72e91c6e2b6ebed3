// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration Binding
//!
//! Turns a loosely-typed configuration document into a [`Configuration`].
//! Every coercion happens here, once, and each failure names the offending
//! field path. Nothing downstream inspects the raw document.
//!
//! # Document Shape
//!
//! ```text
//! vpc_network: vpc-eu-central-1      # optional Name tag
//! vpc_cidr: 10.0.0.0/16              # optional
//! subnets:
//!   eu-central-1a: 10.0.1.0/24
//! database:
//!   allocated_storage: 20
//!   engine: mysql
//!   engine_version: "5.7"
//!   instance_size: db.t3.micro
//!   username: admin
//!   password: secret
//!   skip_final_snapshot: true
//!   max_connections: "100"
//! tags:                              # optional
//!   team: data
//! ```

pub mod loader;

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::{AvailabilityZone, CidrBlock, EngineKind, Secret};
use crate::errors::{ProvisioningError, ProvisioningResult};

pub use loader::ConfigLoader;

/// Network CIDR used when the document does not set `vpc_cidr`
pub const DEFAULT_NETWORK_CIDR: &str = "10.0.0.0/16";

/// Network Name tag used when the document does not set `vpc_network`
pub const DEFAULT_NETWORK_NAME: &str = "vpc";

/// Character set used when the document does not set `database.character_set`
pub const DEFAULT_CHARACTER_SET: &str = "utf8";

/// Typed configuration model
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub network: NetworkSettings,
    /// Zone → subnet CIDR, iterated in zone-name order
    pub subnets: BTreeMap<AvailabilityZone, CidrBlock>,
    pub database: DatabaseSettings,
    /// Extra tags applied to every resource
    pub tags: BTreeMap<String, String>,
}

/// Network container settings
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    pub name: String,
    pub cidr: CidrBlock,
}

/// Database settings
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub allocated_storage: u32,
    pub engine: EngineKind,
    pub engine_version: String,
    pub instance_size: String,
    pub username: String,
    pub password: Secret,
    pub skip_final_snapshot: bool,
    pub max_connections: String,
    pub character_set: String,
    pub parameter_group_family: Option<String>,
    pub extra_parameters: BTreeMap<String, String>,
}

impl DatabaseSettings {
    /// Explicit family, or the one derived from engine and version
    pub fn parameter_group_family(&self) -> String {
        self.parameter_group_family
            .clone()
            .unwrap_or_else(|| self.engine.parameter_group_family(&self.engine_version))
    }
}

/// Bind a raw document into a [`Configuration`]
///
/// Pure: no resource is touched. Fails with `ConfigBinding` for absent
/// fields and `ConfigType` for fields of the wrong type.
pub fn bind(raw: &Value) -> ProvisioningResult<Configuration> {
    let root = Section::root(raw)?;

    let network = bind_network(&root)?;
    let subnets = bind_subnets(&root, &network.cidr)?;
    let database = bind_database(&root.require_section("database")?)?;
    let tags = match root.optional_section("tags")? {
        Some(section) => section.string_map()?,
        None => BTreeMap::new(),
    };

    Ok(Configuration {
        network,
        subnets,
        database,
        tags,
    })
}

fn bind_network(root: &Section<'_>) -> ProvisioningResult<NetworkSettings> {
    let name = root
        .optional_str("vpc_network")?
        .unwrap_or_else(|| DEFAULT_NETWORK_NAME.to_string());

    let cidr = match root.optional_str("vpc_cidr")? {
        Some(raw) => parse_cidr(&root.path_of("vpc_cidr"), &raw)?,
        None => parse_cidr("vpc_cidr", DEFAULT_NETWORK_CIDR)?,
    };

    Ok(NetworkSettings { name, cidr })
}

fn bind_subnets(
    root: &Section<'_>,
    network: &CidrBlock,
) -> ProvisioningResult<BTreeMap<AvailabilityZone, CidrBlock>> {
    let section = root.require_section("subnets")?;
    let mut subnets: BTreeMap<AvailabilityZone, CidrBlock> = BTreeMap::new();

    for (zone_name, value) in section.map {
        let field = section.path_of(zone_name);

        let zone = AvailabilityZone::new(zone_name)
            .map_err(|_| ProvisioningError::mistyped(&field, "an availability zone name", zone_name.as_str()))?;

        let raw = value
            .as_str()
            .ok_or_else(|| ProvisioningError::mistyped(&field, "a CIDR string", describe(value)))?;
        let cidr = parse_cidr(&field, raw)?;

        if !network.contains(&cidr) {
            return Err(ProvisioningError::mistyped(
                &field,
                "a CIDR block inside the network CIDR",
                format!("{cidr} outside {network}"),
            ));
        }

        if let Some((other, _)) = subnets
            .iter()
            .find(|(_, existing)| existing.contains(&cidr) || cidr.contains(*existing))
        {
            return Err(ProvisioningError::mistyped(
                &field,
                "a CIDR block disjoint from every other subnet",
                format!("{cidr} overlapping subnets.{other}"),
            ));
        }

        if subnets.insert(zone, cidr).is_some() {
            return Err(ProvisioningError::mistyped(
                &field,
                "a unique availability zone name",
                format!("a duplicate of zone {:?}", zone_name.trim()),
            ));
        }
    }

    Ok(subnets)
}

fn bind_database(section: &Section<'_>) -> ProvisioningResult<DatabaseSettings> {
    let allocated_storage = coerce_storage(
        &section.path_of("allocated_storage"),
        section.require("allocated_storage")?,
    )?;
    let engine = EngineKind::parse(&section.require_str("engine")?);
    let engine_version = section.require_str("engine_version")?;
    let instance_size = section.require_str("instance_size")?;
    let username = section.require_str("username")?;
    let password = Secret::new(section.require_str("password")?);
    let skip_final_snapshot = section.require_bool("skip_final_snapshot")?;
    let max_connections = section.require_scalar("max_connections")?;

    let character_set = section
        .optional_str("character_set")?
        .unwrap_or_else(|| DEFAULT_CHARACTER_SET.to_string());
    let parameter_group_family = section.optional_str("parameter_group_family")?;
    let extra_parameters = match section.optional_section("parameters")? {
        Some(parameters) => parameters.string_map()?,
        None => BTreeMap::new(),
    };

    Ok(DatabaseSettings {
        allocated_storage,
        engine,
        engine_version,
        instance_size,
        username,
        password,
        skip_final_snapshot,
        max_connections,
        character_set,
        parameter_group_family,
        extra_parameters,
    })
}

fn parse_cidr(field: &str, raw: &str) -> ProvisioningResult<CidrBlock> {
    CidrBlock::new(raw).map_err(|_| ProvisioningError::mistyped(field, "a CIDR block", raw))
}

fn coerce_storage(field: &str, value: &Value) -> ProvisioningResult<u32> {
    const EXPECTED: &str = "a positive whole number";

    let Value::Number(number) = value else {
        return Err(ProvisioningError::mistyped(field, EXPECTED, describe(value)));
    };

    let whole = match number.as_u64() {
        Some(n) => Some(n),
        None => number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64),
    };

    match whole.and_then(|n| u32::try_from(n).ok()) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(ProvisioningError::mistyped(field, EXPECTED, describe(value))),
    }
}

/// Short description of a JSON value for error messages
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

/// An object within the document, with its field path
struct Section<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    fn root(raw: &'a Value) -> ProvisioningResult<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| ProvisioningError::mistyped("document", "an object", describe(raw)))?;
        Ok(Self {
            path: String::new(),
            map,
        })
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Present and non-null
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    fn require(&self, key: &str) -> ProvisioningResult<&'a Value> {
        self.get(key)
            .ok_or_else(|| ProvisioningError::missing(self.path_of(key)))
    }

    fn require_str(&self, key: &str) -> ProvisioningResult<String> {
        let value = self.require(key)?;
        match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
            Some(_) => Err(ProvisioningError::mistyped(
                self.path_of(key),
                "a non-empty string",
                "an empty string",
            )),
            None => Err(ProvisioningError::mistyped(
                self.path_of(key),
                "a string",
                describe(value),
            )),
        }
    }

    fn optional_str(&self, key: &str) -> ProvisioningResult<Option<String>> {
        match self.get(key) {
            Some(_) => self.require_str(key).map(Some),
            None => Ok(None),
        }
    }

    fn require_bool(&self, key: &str) -> ProvisioningResult<bool> {
        let value = self.require(key)?;
        value
            .as_bool()
            .ok_or_else(|| ProvisioningError::mistyped(self.path_of(key), "a boolean", describe(value)))
    }

    /// A string, or a whole number coerced to its decimal form
    fn require_scalar(&self, key: &str) -> ProvisioningResult<String> {
        let value = self.require(key)?;
        scalar_string(value).ok_or_else(|| {
            ProvisioningError::mistyped(self.path_of(key), "a string", describe(value))
        })
    }

    fn require_section(&self, key: &str) -> ProvisioningResult<Section<'a>> {
        let value = self.require(key)?;
        let map = value
            .as_object()
            .ok_or_else(|| ProvisioningError::mistyped(self.path_of(key), "an object", describe(value)))?;
        Ok(Section {
            path: self.path_of(key),
            map,
        })
    }

    fn optional_section(&self, key: &str) -> ProvisioningResult<Option<Section<'a>>> {
        match self.get(key) {
            Some(_) => self.require_section(key).map(Some),
            None => Ok(None),
        }
    }

    fn string_map(&self) -> ProvisioningResult<BTreeMap<String, String>> {
        self.map
            .iter()
            .map(|(key, value)| {
                scalar_string(value)
                    .map(|s| (key.clone(), s))
                    .ok_or_else(|| {
                        ProvisioningError::mistyped(self.path_of(key), "a string", describe(value))
                    })
            })
            .collect()
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}
