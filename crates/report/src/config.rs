//! Report configuration, read from the environment.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use costbook_core::TenantId;
use costbook_inventory::CostingMethod;

pub const SNAPSHOT_ENV: &str = "COSTBOOK_SNAPSHOT";
pub const TENANT_ENV: &str = "COSTBOOK_TENANT";
pub const COSTING_METHOD_ENV: &str = "COSTBOOK_COSTING_METHOD";
pub const AS_OF_ENV: &str = "COSTBOOK_AS_OF";

pub const DEFAULT_TENANT: &str = "default";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// JSON file holding the tenant's documents.
    pub snapshot_path: PathBuf,
    pub tenant_id: TenantId,
    pub method: CostingMethod,
    /// Aging reference date; `None` means today (UTC).
    pub as_of: Option<NaiveDate>,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let snapshot_path = value(SNAPSHOT_ENV)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(SNAPSHOT_ENV))?;

        let tenant_id = TenantId::parse(value(TENANT_ENV).unwrap_or_else(|| DEFAULT_TENANT.to_string()))
            .map_err(|e| ConfigError::Invalid {
                var: TENANT_ENV,
                message: e.to_string(),
            })?;

        let method = match value(COSTING_METHOD_ENV) {
            Some(raw) => raw.parse::<CostingMethod>().map_err(|e| ConfigError::Invalid {
                var: COSTING_METHOD_ENV,
                message: e.to_string(),
            })?,
            None => CostingMethod::default(),
        };

        let as_of = value(AS_OF_ENV)
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| ConfigError::Invalid {
                    var: AS_OF_ENV,
                    message: format!("{raw:?}: {e}"),
                })
            })
            .transpose()?;

        Ok(Self {
            snapshot_path,
            tenant_id,
            method,
            as_of,
        })
    }
}
