use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use costbook_core::TenantId;

use crate::document::{BatchDocument, BillDocument, ProductDocument, TenantDocuments};
use crate::error::StoreError;
use crate::reader::SnapshotReader;
use crate::snapshot::{InventorySnapshot, PayablesSnapshot};

/// In-memory, tenant-isolated document store for tests/dev and file-backed
/// reports.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<TenantId, TenantDocuments>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every document held for `tenant_id`.
    pub fn put_tenant(
        &self,
        tenant_id: TenantId,
        documents: TenantDocuments,
    ) -> Result<(), StoreError> {
        self.write()?.insert(tenant_id, documents);
        Ok(())
    }

    /// Replace a tenant's documents from a JSON `TenantDocuments` value.
    pub fn load_json(&self, tenant_id: TenantId, json: &str) -> Result<(), StoreError> {
        let documents: TenantDocuments = serde_json::from_str(json)?;
        debug!(
            tenant = %tenant_id,
            products = documents.products.len(),
            batches = documents.batches.len(),
            bills = documents.bills.len(),
            "loaded tenant documents"
        );
        self.put_tenant(tenant_id, documents)
    }

    pub fn insert_product(
        &self,
        tenant_id: TenantId,
        doc: ProductDocument,
    ) -> Result<(), StoreError> {
        self.write()?.entry(tenant_id).or_default().products.push(doc);
        Ok(())
    }

    pub fn insert_batch(
        &self,
        tenant_id: TenantId,
        doc: BatchDocument,
    ) -> Result<(), StoreError> {
        self.write()?.entry(tenant_id).or_default().batches.push(doc);
        Ok(())
    }

    pub fn insert_bill(
        &self,
        tenant_id: TenantId,
        doc: BillDocument,
    ) -> Result<(), StoreError> {
        self.write()?.entry(tenant_id).or_default().bills.push(doc);
        Ok(())
    }

    /// Drop all documents for a tenant.
    pub fn clear_tenant(&self, tenant_id: &TenantId) -> Result<(), StoreError> {
        self.write()?.remove(tenant_id);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TenantId, TenantDocuments>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("document store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TenantId, TenantDocuments>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("document store lock poisoned".to_string()))
    }
}

impl SnapshotReader for InMemoryDocumentStore {
    fn inventory_snapshot(&self, tenant_id: &TenantId) -> Result<InventorySnapshot, StoreError> {
        let map = self.read()?;
        let docs = map
            .get(tenant_id)
            .ok_or_else(|| StoreError::TenantNotFound(tenant_id.clone()))?;
        Ok(InventorySnapshot::from_documents(
            tenant_id.clone(),
            &docs.products,
            &docs.batches,
        )?)
    }

    fn payables_snapshot(&self, tenant_id: &TenantId) -> Result<PayablesSnapshot, StoreError> {
        let map = self.read()?;
        let docs = map
            .get(tenant_id)
            .ok_or_else(|| StoreError::TenantNotFound(tenant_id.clone()))?;
        Ok(PayablesSnapshot::from_documents(tenant_id.clone(), &docs.bills)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use costbook_inventory::CostingMethod;
    use rust_decimal_macros::dec;

    fn tenant(s: &str) -> TenantId {
        TenantId::parse(s).unwrap()
    }

    const ACME: &str = r#"{
        "products": [
            { "id": "P1", "name": "Widget", "type": "Stock", "costPrice": 100 },
            { "id": "S1", "name": "Install", "type": "Service" }
        ],
        "batches": [
            { "id": "B1", "productId": "P1", "quantity": 5, "createdAt": "2024-01-01T00:00:00Z" },
            { "id": "B2", "productId": "P1", "quantity": 3, "createdAt": "2024-02-01T00:00:00Z" }
        ],
        "bills": [
            { "id": "BL1", "supplierId": "SUP1", "dueDate": "2024-05-16", "balance": 1000 }
        ]
    }"#;

    #[test]
    fn reads_tenant_snapshots() {
        let store = InMemoryDocumentStore::new();
        store.load_json(tenant("acme"), ACME).unwrap();

        let inventory = store.inventory_snapshot(&tenant("acme")).unwrap();
        assert_eq!(inventory.products.len(), 2);
        let results = inventory.valuate(CostingMethod::Fifo);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total_quantity, dec!(8));

        let payables = store.payables_snapshot(&tenant("acme")).unwrap();
        assert_eq!(payables.bills.len(), 1);
    }

    #[test]
    fn tenants_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store.load_json(tenant("acme"), ACME).unwrap();
        store.insert_product(
            tenant("globex"),
            ProductDocument {
                id: Some("G1".to_string()),
                product_type: Some("Stock".to_string()),
                ..ProductDocument::default()
            },
        )
        .unwrap();

        let globex = store.inventory_snapshot(&tenant("globex")).unwrap();
        assert_eq!(globex.products.len(), 1);
        assert_eq!(globex.products[0].id_typed().as_str(), "G1");
        assert!(globex.batches.is_empty());
    }

    #[test]
    fn unknown_tenant_is_an_error() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(
            store.inventory_snapshot(&tenant("nobody")),
            Err(StoreError::TenantNotFound(_))
        ));
        assert!(matches!(
            store.payables_snapshot(&tenant("nobody")),
            Err(StoreError::TenantNotFound(_))
        ));
    }

    #[test]
    fn invalid_documents_surface_as_invalid_document() {
        let store = InMemoryDocumentStore::new();
        store.insert_batch(tenant("acme"), BatchDocument::default()).unwrap();
        assert!(matches!(
            store.inventory_snapshot(&tenant("acme")),
            Err(StoreError::InvalidDocument(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(
            store.load_json(tenant("acme"), "{ not json"),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn clearing_a_tenant_removes_its_documents() {
        let store = InMemoryDocumentStore::new();
        store.load_json(tenant("acme"), ACME).unwrap();
        store.clear_tenant(&tenant("acme")).unwrap();
        assert!(store.payables_snapshot(&tenant("acme")).is_err());
    }

    #[test]
    fn bills_can_be_inserted_one_by_one() {
        let store = InMemoryDocumentStore::new();
        store.insert_bill(
            tenant("acme"),
            BillDocument {
                id: Some("BL9".to_string()),
                supplier_id: Some("SUP1".to_string()),
                due_date: Some("2024-06-30".to_string()),
                ..BillDocument::default()
            },
        )
        .unwrap();
        let payables = store.payables_snapshot(&tenant("acme")).unwrap();
        assert_eq!(payables.bills[0].outstanding(), rust_decimal::Decimal::ZERO);
    }

    #[test]
    fn poisoned_lock_fails_writes_instead_of_dropping_them() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.inner.write().unwrap();
            panic!("writer panicked while holding the lock");
        })
        .join();

        assert!(matches!(
            store.load_json(tenant("acme"), r#"{ "products": [] }"#),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.insert_product(tenant("acme"), ProductDocument::default()),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.clear_tenant(&tenant("acme")),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.inventory_snapshot(&tenant("acme")),
            Err(StoreError::Unavailable(_))
        ));
    }
}
