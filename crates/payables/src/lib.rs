//! Accounts payable domain module.
//!
//! Supplier bills and their aging, implemented as deterministic domain logic
//! (no IO, no storage).

pub mod aging;
pub mod bill;

pub use aging::{AgingBucket, AgingBuckets, SupplierAging, bucketize, bucketize_by_supplier};
pub use bill::{Bill, BillStatus};
