use anyhow::Context;
use chrono::Utc;

use costbook_report::{ReportConfig, ReportService, load_store};

fn main() -> anyhow::Result<()> {
    costbook_observability::init();

    let config = ReportConfig::from_env().context("invalid report configuration")?;
    let as_of = config.as_of.unwrap_or_else(|| Utc::now().date_naive());

    tracing::info!(
        tenant_id = %config.tenant_id,
        method = %config.method,
        snapshot = %config.snapshot_path.display(),
        "building tenant report"
    );

    let store = load_store(&config.snapshot_path, &config.tenant_id)?;
    let report = ReportService::new(store).tenant_report(&config.tenant_id, config.method, as_of)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
