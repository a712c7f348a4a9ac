use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{BatchId, Entity, ProductId};

/// A lot of stock received for one product at a point in time.
///
/// `quantity` is the amount still on hand in this lot. It is signed because
/// upstream adjustments may drive it to zero or below; such lots simply stop
/// contributing to valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    id: BatchId,
    product_id: ProductId,
    quantity: Decimal,
    created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(
        id: BatchId,
        product_id: ProductId,
        quantity: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            quantity,
            created_at,
        }
    }

    pub fn id_typed(&self) -> &BatchId {
        &self.id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Only lots with units remaining are valued.
    pub fn is_eligible(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
