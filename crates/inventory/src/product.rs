use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{DomainError, DomainResult, Entity, ProductId};

/// Kind of catalog product. Only [`ProductType::Stock`] carries on-hand
/// quantities that can be valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    Stock,
    Service,
    Bundle,
    Consumable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Stock => "Stock",
            ProductType::Service => "Service",
            ProductType::Bundle => "Bundle",
            ProductType::Consumable => "Consumable",
        }
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(ProductType::Stock),
            "service" => Ok(ProductType::Service),
            "bundle" => Ok(ProductType::Bundle),
            "consumable" => Ok(ProductType::Consumable),
            other => Err(DomainError::validation(format!("unknown product type: {other:?}"))),
        }
    }
}

/// Catalog product as read from a tenant snapshot.
///
/// `cost_price` is the standard unit cost. It is optional because catalog
/// documents frequently omit it; valuation treats a missing cost as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    product_type: ProductType,
    cost_price: Option<Decimal>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            id,
            name: name.into(),
            product_type,
            cost_price: None,
        }
    }

    /// Attach a standard unit cost. Negative costs are rejected.
    pub fn with_cost_price(mut self, cost_price: Decimal) -> DomainResult<Self> {
        if cost_price < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "product {}: cost price cannot be negative ({cost_price})",
                self.id
            )));
        }
        self.cost_price = Some(cost_price);
        Ok(self)
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn cost_price(&self) -> Option<Decimal> {
        self.cost_price
    }

    /// Unit cost used for valuation: a missing cost price counts as zero.
    pub fn effective_cost_price(&self) -> Decimal {
        self.cost_price.unwrap_or(Decimal::ZERO)
    }

    /// Only stock-tracked products participate in valuation.
    pub fn is_stock_tracked(&self) -> bool {
        self.product_type == ProductType::Stock
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pid(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[test]
    fn missing_cost_price_values_at_zero() {
        let p = Product::new(pid("P1"), "Widget", ProductType::Stock);
        assert_eq!(p.cost_price(), None);
        assert_eq!(p.effective_cost_price(), Decimal::ZERO);
    }

    #[test]
    fn negative_cost_price_is_rejected() {
        let err = Product::new(pid("P1"), "Widget", ProductType::Stock)
            .with_cost_price(dec!(-0.01))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_cost_price_is_allowed() {
        let p = Product::new(pid("P1"), "Widget", ProductType::Stock)
            .with_cost_price(Decimal::ZERO)
            .unwrap();
        assert_eq!(p.cost_price(), Some(Decimal::ZERO));
    }

    #[test]
    fn only_stock_products_are_tracked() {
        for (ty, tracked) in [
            (ProductType::Stock, true),
            (ProductType::Service, false),
            (ProductType::Bundle, false),
            (ProductType::Consumable, false),
        ] {
            assert_eq!(Product::new(pid("X"), "x", ty).is_stock_tracked(), tracked);
        }
    }

    #[test]
    fn product_type_parses_case_insensitively() {
        assert_eq!("stock".parse::<ProductType>().unwrap(), ProductType::Stock);
        assert_eq!(" Service ".parse::<ProductType>().unwrap(), ProductType::Service);
        assert!("Kit".parse::<ProductType>().is_err());
    }
}
