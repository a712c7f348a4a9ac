//! Validated, tenant-scoped snapshots handed to the domain engines.

use std::collections::HashSet;

use chrono::NaiveDate;

use costbook_core::{DomainError, DomainResult, Entity, TenantId};
use costbook_inventory::{Batch, CostingMethod, Product, ValuationResult, compute_valuation};
use costbook_payables::{AgingBuckets, Bill, SupplierAging, bucketize, bucketize_by_supplier};

use crate::document::{BatchDocument, BillDocument, ProductDocument};

/// Complete product catalog and batch set of one tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub tenant_id: TenantId,
    pub products: Vec<Product>,
    pub batches: Vec<Batch>,
}

impl InventorySnapshot {
    pub fn from_documents(
        tenant_id: TenantId,
        products: &[ProductDocument],
        batches: &[BatchDocument],
    ) -> DomainResult<Self> {
        let products = products
            .iter()
            .map(ProductDocument::validate)
            .collect::<DomainResult<Vec<_>>>()?;
        let batches = batches
            .iter()
            .map(BatchDocument::validate)
            .collect::<DomainResult<Vec<_>>>()?;

        ensure_unique_ids("products", &products)?;
        ensure_unique_ids("batches", &batches)?;

        Ok(Self {
            tenant_id,
            products,
            batches,
        })
    }

    pub fn valuate(&self, method: CostingMethod) -> Vec<ValuationResult> {
        compute_valuation(&self.products, &self.batches, method)
    }
}

/// Complete supplier bill set of one tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayablesSnapshot {
    pub tenant_id: TenantId,
    pub bills: Vec<Bill>,
}

impl PayablesSnapshot {
    pub fn from_documents(tenant_id: TenantId, bills: &[BillDocument]) -> DomainResult<Self> {
        let bills = bills
            .iter()
            .map(BillDocument::validate)
            .collect::<DomainResult<Vec<_>>>()?;

        ensure_unique_ids("bills", &bills)?;

        Ok(Self { tenant_id, bills })
    }

    pub fn aging(&self, as_of: NaiveDate) -> AgingBuckets {
        bucketize(&self.bills, as_of)
    }

    pub fn aging_by_supplier(&self, as_of: NaiveDate) -> Vec<SupplierAging> {
        bucketize_by_supplier(&self.bills, as_of)
    }
}

fn ensure_unique_ids<E>(collection: &str, records: &[E]) -> DomainResult<()>
where
    E: Entity,
    E::Id: core::fmt::Display,
{
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(DomainError::validation(format!(
                "{collection}/{}: duplicate id in snapshot",
                record.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tenant() -> TenantId {
        TenantId::parse("acme").unwrap()
    }

    fn product_doc(id: &str, cost: i64) -> ProductDocument {
        ProductDocument {
            id: Some(id.to_string()),
            name: Some(format!("Product {id}")),
            product_type: Some("Stock".to_string()),
            cost_price: Some(cost.into()),
        }
    }

    fn batch_doc(id: &str, product: &str, qty: i64) -> BatchDocument {
        BatchDocument {
            id: Some(id.to_string()),
            product_id: Some(product.to_string()),
            quantity: Some(qty.into()),
            created_at: Some("2024-01-01T00:00:00Z".parse().unwrap()),
        }
    }

    #[test]
    fn inventory_snapshot_valuates() {
        let snapshot = InventorySnapshot::from_documents(
            tenant(),
            &[product_doc("P1", 100)],
            &[batch_doc("B1", "P1", 5), batch_doc("B2", "P1", 3)],
        )
        .unwrap();

        let results = snapshot.valuate(CostingMethod::WeightedAverage);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total_value, dec!(800));
    }

    #[test]
    fn duplicate_product_ids_are_rejected() {
        let err = InventorySnapshot::from_documents(
            tenant(),
            &[product_doc("P1", 1), product_doc("P1", 2)],
            &[],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("products/P1: duplicate id in snapshot")
        );
    }

    #[test]
    fn one_invalid_batch_fails_the_whole_snapshot() {
        let mut bad = batch_doc("B2", "P1", 1);
        bad.created_at = None;

        let result = InventorySnapshot::from_documents(
            tenant(),
            &[product_doc("P1", 1)],
            &[batch_doc("B1", "P1", 1), bad],
        );
        assert!(result.is_err());
    }

    #[test]
    fn payables_snapshot_ages_bills() {
        let bill = BillDocument {
            id: Some("BL1".to_string()),
            supplier_id: Some("S1".to_string()),
            supplier_name: Some("Acme Metals".to_string()),
            due_date: Some("2024-05-16".to_string()),
            balance: Some(dec!(1000)),
            status: None,
        };
        let snapshot = PayablesSnapshot::from_documents(tenant(), &[bill]).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        assert_eq!(snapshot.aging(as_of).days_31_60, dec!(1000));
        let by_supplier = snapshot.aging_by_supplier(as_of);
        assert_eq!(by_supplier.len(), 1);
        assert_eq!(by_supplier[0].supplier_name.as_deref(), Some("Acme Metals"));
    }
}
