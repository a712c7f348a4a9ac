//! Inventory valuation domain module.
//!
//! Pure, deterministic valuation of on-hand stock (no IO, no storage): a
//! product catalog and its stock batches go in, one valuation line per stock
//! product comes out.

pub mod batch;
pub mod costing;
pub mod product;
pub mod valuation;

pub use batch::Batch;
pub use costing::{CostLayer, CostingMethod, cost_layers, order_batches};
pub use product::{Product, ProductType};
pub use valuation::{ValuationResult, ValuationSummary, compute_valuation};
