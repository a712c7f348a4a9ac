//! Inventory valuation.
//!
//! Values the on-hand stock of a tenant's catalog under a costing method:
//! quantity on hand, total value and effective unit cost per stock product.
//!
//! NOTE: cost is carried by the product (standard cost), not by the batch, so
//! FIFO and LIFO currently produce the same totals as weighted average. The
//! ordering and layering below are kept so that a per-batch receipt cost only
//! needs to change [`CostLayer::for_batch`].

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{ProductId, ValueObject};

use crate::batch::Batch;
use crate::costing::{CostLayer, CostingMethod, cost_layers, order_batches};
use crate::product::Product;

/// Valuation of one stock product.
///
/// Only emitted when `total_quantity > 0`, so `unit_cost` is always defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_quantity: Decimal,
    pub total_value: Decimal,
    pub unit_cost: Decimal,
    pub method: CostingMethod,
}

impl ValueObject for ValuationResult {}

/// Compute per-product valuation for a catalog snapshot.
///
/// - non-stock products are skipped;
/// - batches with `quantity <= 0`, or for products outside `products`, are ignored;
/// - products ending with no eligible quantity are omitted.
///
/// Results follow catalog order.
pub fn compute_valuation(
    products: &[Product],
    batches: &[Batch],
    method: CostingMethod,
) -> Vec<ValuationResult> {
    let ordered = order_batches(batches, method);

    let mut by_product: HashMap<&ProductId, Vec<&Batch>> = HashMap::new();
    for batch in ordered {
        by_product.entry(batch.product_id()).or_default().push(batch);
    }

    products
        .iter()
        .filter(|p| p.is_stock_tracked())
        .filter_map(|product| {
            let batches = by_product
                .get(product.id_typed())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let layers = cost_layers(product, batches.iter().copied());
            value_product(product, &layers, method)
        })
        .collect()
}

fn value_product(
    product: &Product,
    layers: &[CostLayer],
    method: CostingMethod,
) -> Option<ValuationResult> {
    let (total_quantity, total_value) = match method {
        CostingMethod::WeightedAverage => weighted_average(layers),
        CostingMethod::Fifo | CostingMethod::Lifo => layered(layers),
    };

    if total_quantity <= Decimal::ZERO {
        return None;
    }

    // Totals saturate at `Decimal::MAX`; the quotient is clamped the same way
    // so a product with stock is never dropped.
    let unit_cost = total_value
        .checked_div(total_quantity)
        .unwrap_or(Decimal::MAX);

    Some(ValuationResult {
        product_id: product.id_typed().clone(),
        product_name: product.name().to_string(),
        total_quantity,
        total_value,
        unit_cost,
        method,
    })
}

/// Σ(quantity × cost) over all layers at once.
fn weighted_average(layers: &[CostLayer]) -> (Decimal, Decimal) {
    let total_quantity = layers
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.quantity));
    let total_value = layers
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.value()));
    (total_quantity, total_value)
}

/// Walk layers in consumption order, accumulating quantity and value.
fn layered(layers: &[CostLayer]) -> (Decimal, Decimal) {
    let mut total_quantity = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;
    for layer in layers {
        total_quantity = total_quantity.saturating_add(layer.quantity);
        total_value = total_value.saturating_add(layer.value());
    }
    (total_quantity, total_value)
}

/// Tenant-level roll-up of a valuation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub valued_products: usize,
    pub total_quantity: Decimal,
    pub total_value: Decimal,
}

impl ValueObject for ValuationSummary {}

impl ValuationSummary {
    pub fn from_results(results: &[ValuationResult]) -> Self {
        Self {
            valued_products: results.len(),
            total_quantity: results
                .iter()
                .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.total_quantity)),
            total_value: results
                .iter()
                .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.total_value)),
        }
    }
}
