//! Document store boundary.
//!
//! Loosely typed per-tenant documents are validated here into the explicit
//! records the domain crates work on, and handed out as complete snapshots.

pub mod document;
pub mod error;
pub mod memory;
pub mod reader;
pub mod snapshot;

pub use document::{BatchDocument, BillDocument, ProductDocument, TenantDocuments};
pub use error::StoreError;
pub use memory::InMemoryDocumentStore;
pub use reader::SnapshotReader;
pub use snapshot::{InventorySnapshot, PayablesSnapshot};
