// Copyright (c) 2025 - Cowboy AI, Inc.
//! Database Engine Domain Model
//!
//! Engine-specific rules that shape the parameter group and the credential
//! policy: parameter-group family naming, default port, username limits and
//! reserved account names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Database engine family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Mysql,
    Mariadb,
    Postgres,
    /// Any engine without dedicated rules, keeps its configured name
    Other(String),
}

const MYSQL_RESERVED: &[&str] = &[
    "root",
    "mysql",
    "rdsadmin",
    "rdsrepladmin",
    "mysql.sys",
    "mysql.session",
    "mysql.infoschema",
];

const POSTGRES_RESERVED: &[&str] = &[
    "postgres",
    "rdsadmin",
    "rdsrepladmin",
    "rds_superuser",
    "rds_replication",
    "rds_password",
];

impl EngineKind {
    /// Classify an engine name as written in configuration
    pub fn parse(engine: &str) -> Self {
        match engine.trim().to_ascii_lowercase().as_str() {
            "mysql" => EngineKind::Mysql,
            "mariadb" => EngineKind::Mariadb,
            "postgres" | "postgresql" => EngineKind::Postgres,
            other => EngineKind::Other(other.to_string()),
        }
    }

    /// Engine name as the provisioning engine expects it
    pub fn as_str(&self) -> &str {
        match self {
            EngineKind::Mysql => "mysql",
            EngineKind::Mariadb => "mariadb",
            EngineKind::Postgres => "postgres",
            EngineKind::Other(name) => name,
        }
    }

    /// MySQL and MariaDB share parameter names and account rules
    pub fn is_mysql_family(&self) -> bool {
        matches!(self, EngineKind::Mysql | EngineKind::Mariadb)
    }

    /// Parameter-group family for an engine version
    ///
    /// - MySQL/MariaDB: `<engine><major>.<minor>`, e.g. `mysql5.7`
    /// - PostgreSQL 10+: `postgres<major>`; older: `postgres<major>.<minor>`
    /// - Others: `<engine><version>`
    pub fn parameter_group_family(&self, version: &str) -> String {
        let mut parts = version.trim().split('.');
        let major = parts.next().unwrap_or_default();
        let minor = parts.next();

        match self {
            EngineKind::Mysql | EngineKind::Mariadb => match minor {
                Some(minor) => format!("{}{}.{}", self.as_str(), major, minor),
                None => format!("{}{}", self.as_str(), major),
            },
            EngineKind::Postgres => {
                let modern = major.parse::<u32>().map(|m| m >= 10).unwrap_or(true);
                match minor {
                    Some(minor) if !modern => format!("postgres{major}.{minor}"),
                    _ => format!("postgres{major}"),
                }
            }
            EngineKind::Other(name) => format!("{}{}", name, version.trim()),
        }
    }

    /// Default listener port
    pub fn default_port(&self) -> u16 {
        match self {
            EngineKind::Postgres => 5432,
            _ => 3306,
        }
    }

    /// Longest master username the engine accepts
    pub fn max_username_len(&self) -> usize {
        if self.is_mysql_family() {
            16
        } else {
            63
        }
    }

    /// Account names the engine reserves for itself
    pub fn reserved_usernames(&self) -> &'static [&'static str] {
        match self {
            EngineKind::Mysql | EngineKind::Mariadb => MYSQL_RESERVED,
            EngineKind::Postgres => POSTGRES_RESERVED,
            EngineKind::Other(_) => &[],
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
