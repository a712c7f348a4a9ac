use std::sync::Arc;

use costbook_core::TenantId;

use crate::error::StoreError;
use crate::snapshot::{InventorySnapshot, PayablesSnapshot};

/// Tenant-scoped reader of complete collection snapshots.
///
/// Implementations return either the full, validated set of records for the
/// tenant or an error; never a partial snapshot.
pub trait SnapshotReader: Send + Sync {
    fn inventory_snapshot(&self, tenant_id: &TenantId) -> Result<InventorySnapshot, StoreError>;

    fn payables_snapshot(&self, tenant_id: &TenantId) -> Result<PayablesSnapshot, StoreError>;
}

impl<S> SnapshotReader for Arc<S>
where
    S: SnapshotReader + ?Sized,
{
    fn inventory_snapshot(&self, tenant_id: &TenantId) -> Result<InventorySnapshot, StoreError> {
        (**self).inventory_snapshot(tenant_id)
    }

    fn payables_snapshot(&self, tenant_id: &TenantId) -> Result<PayablesSnapshot, StoreError> {
        (**self).payables_snapshot(tenant_id)
    }
}
