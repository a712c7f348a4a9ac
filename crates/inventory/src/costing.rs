//! Costing methods and cost layers.
//!
//! A cost layer is one eligible batch seen through a costing method: the units
//! it still holds, the unit cost assigned to them and its receipt time. Layers
//! are produced in consumption order (oldest first for FIFO, newest first for
//! LIFO) so that layered valuation can walk them front to back.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{BatchId, DomainError, ValueObject};

use crate::batch::Batch;
use crate::product::Product;

/// Accounting convention used to assign value to units on hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostingMethod {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "LIFO")]
    Lifo,
    #[default]
    WeightedAverage,
}

impl CostingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostingMethod::Fifo => "FIFO",
            CostingMethod::Lifo => "LIFO",
            CostingMethod::WeightedAverage => "WeightedAverage",
        }
    }

    /// Whether this method walks batches newest-first.
    pub fn is_newest_first(&self) -> bool {
        matches!(self, CostingMethod::Lifo)
    }
}

impl core::fmt::Display for CostingMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(CostingMethod::Fifo),
            "lifo" => Ok(CostingMethod::Lifo),
            "weightedaverage" | "weighted_average" | "weighted-average" | "wac" => {
                Ok(CostingMethod::WeightedAverage)
            }
            other => Err(DomainError::validation(format!(
                "unknown costing method: {other:?} (expected FIFO, LIFO or WeightedAverage)"
            ))),
        }
    }
}

/// Order batches for a costing method.
///
/// FIFO and weighted average receive batches oldest first; LIFO receives the
/// exact reverse. The sort is stable, so batches sharing a `created_at` keep
/// their insertion order (reversed for LIFO).
pub fn order_batches(batches: &[Batch], method: CostingMethod) -> Vec<&Batch> {
    let mut ordered: Vec<&Batch> = batches.iter().collect();
    ordered.sort_by_key(|b| b.created_at());
    if method.is_newest_first() {
        ordered.reverse();
    }
    ordered
}

/// Units of one batch together with the cost assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLayer {
    pub batch_id: BatchId,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub received_at: DateTime<Utc>,
}

impl ValueObject for CostLayer {}

impl CostLayer {
    /// Build the layer for an eligible batch of `product`.
    ///
    /// The unit cost comes from the product's standard cost: batches do not
    /// capture their own receipt cost yet, so every layer of a product carries
    /// the same cost.
    pub fn for_batch(product: &Product, batch: &Batch) -> Self {
        Self {
            batch_id: batch.id_typed().clone(),
            quantity: batch.quantity(),
            unit_cost: product.effective_cost_price(),
            received_at: batch.created_at(),
        }
    }

    pub fn value(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_cost)
    }
}

/// Turn a product's batches (already in costing order) into cost layers,
/// dropping lots with nothing on hand.
pub fn cost_layers<'a>(
    product: &Product,
    batches: impl IntoIterator<Item = &'a Batch>,
) -> Vec<CostLayer> {
    batches
        .into_iter()
        .filter(|b| b.is_eligible())
        .map(|b| CostLayer::for_batch(product, b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductType;
    use chrono::{Duration, TimeZone};
    use costbook_core::ProductId;
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn batch(id: &str, qty: Decimal, day: i64) -> Batch {
        Batch::new(
            BatchId::parse(id).unwrap(),
            ProductId::parse("P1").unwrap(),
            qty,
            t0() + Duration::days(day),
        )
    }

    fn ids(batches: &[&Batch]) -> Vec<String> {
        batches.iter().map(|b| b.id_typed().to_string()).collect()
    }

    #[test]
    fn fifo_orders_oldest_first() {
        let batches = vec![batch("B3", dec!(1), 3), batch("B1", dec!(1), 1), batch("B2", dec!(1), 2)];
        let ordered = order_batches(&batches, CostingMethod::Fifo);
        assert_eq!(ids(&ordered), ["B1", "B2", "B3"]);

        let ordered = order_batches(&batches, CostingMethod::WeightedAverage);
        assert_eq!(ids(&ordered), ["B1", "B2", "B3"]);
    }

    #[test]
    fn lifo_orders_newest_first() {
        let batches = vec![batch("B3", dec!(1), 3), batch("B1", dec!(1), 1), batch("B2", dec!(1), 2)];
        let ordered = order_batches(&batches, CostingMethod::Lifo);
        assert_eq!(ids(&ordered), ["B3", "B2", "B1"]);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let batches = vec![batch("A", dec!(1), 1), batch("B", dec!(1), 1), batch("C", dec!(1), 0)];
        assert_eq!(ids(&order_batches(&batches, CostingMethod::Fifo)), ["C", "A", "B"]);
        assert_eq!(ids(&order_batches(&batches, CostingMethod::Lifo)), ["B", "A", "C"]);
    }

    #[test]
    fn layers_skip_empty_lots_and_use_standard_cost() {
        let product = Product::new(ProductId::parse("P1").unwrap(), "Widget", ProductType::Stock)
            .with_cost_price(dec!(2.50))
            .unwrap();
        let batches = vec![batch("B1", dec!(4), 1), batch("B2", Decimal::ZERO, 2), batch("B3", dec!(-1), 3)];

        let layers = cost_layers(&product, &batches);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].batch_id.as_str(), "B1");
        assert_eq!(layers[0].unit_cost, dec!(2.50));
        assert_eq!(layers[0].value(), dec!(10.00));
    }

    #[test]
    fn costing_method_parses_common_spellings() {
        assert_eq!("fifo".parse::<CostingMethod>().unwrap(), CostingMethod::Fifo);
        assert_eq!("LIFO".parse::<CostingMethod>().unwrap(), CostingMethod::Lifo);
        for s in ["WeightedAverage", "weighted_average", "weighted-average", "WAC"] {
            assert_eq!(s.parse::<CostingMethod>().unwrap(), CostingMethod::WeightedAverage);
        }
        assert!("average".parse::<CostingMethod>().is_err());
    }

    #[test]
    fn costing_method_serializes_with_display_names() {
        assert_eq!(serde_json::to_value(CostingMethod::Fifo).unwrap(), serde_json::json!("FIFO"));
        assert_eq!(
            serde_json::to_value(CostingMethod::WeightedAverage).unwrap(),
            serde_json::json!("WeightedAverage")
        );
        let m: CostingMethod = serde_json::from_str("\"LIFO\"").unwrap();
        assert_eq!(m, CostingMethod::Lifo);
    }
}
