//! Report service: reads tenant snapshots and runs the valuation and aging
//! engines over them.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use costbook_core::TenantId;
use costbook_inventory::{CostingMethod, ValuationResult, ValuationSummary};
use costbook_payables::{AgingBuckets, SupplierAging};
use costbook_store::{SnapshotReader, StoreError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read tenant snapshot: {0}")]
    Store(#[from] StoreError),
}

/// Everything the back office shows for one tenant on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantReport {
    pub tenant_id: TenantId,
    pub method: CostingMethod,
    pub as_of: NaiveDate,
    pub valuation: Vec<ValuationResult>,
    pub valuation_summary: ValuationSummary,
    pub aging: AgingBuckets,
    pub aging_by_supplier: Vec<SupplierAging>,
}

#[derive(Debug, Clone)]
pub struct ReportService<R> {
    reader: R,
}

impl<R> ReportService<R>
where
    R: SnapshotReader,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Value the tenant's stock under `method`.
    #[instrument(skip_all, fields(tenant_id = %tenant_id, method = %method), err)]
    pub fn inventory_valuation(
        &self,
        tenant_id: &TenantId,
        method: CostingMethod,
    ) -> Result<Vec<ValuationResult>, ReportError> {
        let snapshot = self.reader.inventory_snapshot(tenant_id)?;

        let uncosted = snapshot
            .products
            .iter()
            .filter(|p| p.is_stock_tracked() && p.cost_price().is_none())
            .count();
        if uncosted > 0 {
            debug!(uncosted, "stock products without cost price are valued at zero");
        }

        let results = snapshot.valuate(method);
        info!(
            products = snapshot.products.len(),
            batches = snapshot.batches.len(),
            valued = results.len(),
            "inventory valuation computed"
        );
        Ok(results)
    }

    /// Age the tenant's unsettled supplier bills as of `as_of`.
    #[instrument(skip_all, fields(tenant_id = %tenant_id, as_of = %as_of), err)]
    pub fn supplier_aging(
        &self,
        tenant_id: &TenantId,
        as_of: NaiveDate,
    ) -> Result<AgingBuckets, ReportError> {
        let snapshot = self.reader.payables_snapshot(tenant_id)?;
        let buckets = snapshot.aging(as_of);
        info!(bills = snapshot.bills.len(), total = %buckets.total(), "supplier aging computed");
        Ok(buckets)
    }

    #[instrument(skip_all, fields(tenant_id = %tenant_id, as_of = %as_of), err)]
    pub fn supplier_aging_by_supplier(
        &self,
        tenant_id: &TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<SupplierAging>, ReportError> {
        let snapshot = self.reader.payables_snapshot(tenant_id)?;
        Ok(snapshot.aging_by_supplier(as_of))
    }

    /// Full report: valuation, its summary and payables aging.
    ///
    /// Each collection is read exactly once.
    #[instrument(skip_all, fields(tenant_id = %tenant_id, method = %method, as_of = %as_of), err)]
    pub fn tenant_report(
        &self,
        tenant_id: &TenantId,
        method: CostingMethod,
        as_of: NaiveDate,
    ) -> Result<TenantReport, ReportError> {
        let inventory = self.reader.inventory_snapshot(tenant_id)?;
        let payables = self.reader.payables_snapshot(tenant_id)?;

        let valuation = inventory.valuate(method);
        let valuation_summary = ValuationSummary::from_results(&valuation);
        let aging = payables.aging(as_of);
        let aging_by_supplier = payables.aging_by_supplier(as_of);

        info!(
            valued = valuation.len(),
            total_value = %valuation_summary.total_value,
            payables_total = %aging.total(),
            "tenant report built"
        );

        Ok(TenantReport {
            tenant_id: tenant_id.clone(),
            method,
            as_of,
            valuation,
            valuation_summary,
            aging,
            aging_by_supplier,
        })
    }
}
