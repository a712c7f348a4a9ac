//! `costbook-report`: tenant inventory valuation and payables aging reports.

pub mod config;
pub mod service;

use std::path::Path;

use anyhow::Context;

use costbook_core::TenantId;
use costbook_store::InMemoryDocumentStore;

pub use config::{ConfigError, ReportConfig};
pub use service::{ReportError, ReportService, TenantReport};

/// Load a tenant's documents from a JSON file into a fresh in-memory store.
pub fn load_store(path: &Path, tenant_id: &TenantId) -> anyhow::Result<InMemoryDocumentStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {}", path.display()))?;

    let store = InMemoryDocumentStore::new();
    store
        .load_json(tenant_id.clone(), &json)
        .with_context(|| format!("failed to load snapshot file {}", path.display()))?;
    Ok(store)
}
