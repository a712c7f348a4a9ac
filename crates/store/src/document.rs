//! Raw documents as stored per tenant, and their validation into domain records.
//!
//! Documents are loosely typed: every field is optional here and checked when
//! converted. Required fields that are missing, unknown enum values and
//! negative cost prices are validation errors. A missing cost price or balance
//! is accepted and left as `None` (valued as zero downstream).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{BatchId, BillId, DomainError, DomainResult, ProductId, SupplierId};
use costbook_inventory::{Batch, Product, ProductType};
use costbook_payables::{Bill, BillStatus};

/// Product document (`products` collection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub cost_price: Option<Decimal>,
}

/// Batch document (`batches` collection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDocument {
    pub id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Supplier bill document (`bills` collection).
///
/// `due_date` accepts a calendar date (`2024-06-30`) or an RFC 3339 timestamp,
/// whose UTC date is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDocument {
    pub id: Option<String>,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub due_date: Option<String>,
    pub balance: Option<Decimal>,
    pub status: Option<String>,
}

/// All documents held for one tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantDocuments {
    pub products: Vec<ProductDocument>,
    pub batches: Vec<BatchDocument>,
    pub bills: Vec<BillDocument>,
}

fn required<T>(value: Option<T>, collection: &str, key: &str, field: &str) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::validation(format!("{collection}/{key}: missing {field}")))
}

fn key_of(id: &Option<String>) -> &str {
    id.as_deref().unwrap_or("<no id>")
}

impl ProductDocument {
    pub fn validate(&self) -> DomainResult<Product> {
        let key = key_of(&self.id);
        let id = ProductId::parse(required(self.id.clone(), "products", key, "id")?)?;
        let product_type = required(self.product_type.as_deref(), "products", key, "type")?
            .parse::<ProductType>()?;

        let product = Product::new(id, self.name.clone().unwrap_or_default(), product_type);
        match self.cost_price {
            Some(cost) => product.with_cost_price(cost),
            None => Ok(product),
        }
    }
}

impl BatchDocument {
    pub fn validate(&self) -> DomainResult<Batch> {
        let key = key_of(&self.id);
        let id = BatchId::parse(required(self.id.clone(), "batches", key, "id")?)?;
        let product_id =
            ProductId::parse(required(self.product_id.clone(), "batches", key, "productId")?)?;
        let created_at = required(self.created_at, "batches", key, "createdAt")?;

        // A lot with no recorded quantity holds nothing.
        Ok(Batch::new(
            id,
            product_id,
            self.quantity.unwrap_or(Decimal::ZERO),
            created_at,
        ))
    }
}

impl BillDocument {
    pub fn validate(&self) -> DomainResult<Bill> {
        let key = key_of(&self.id);
        let id = BillId::parse(required(self.id.clone(), "bills", key, "id")?)?;
        let supplier_id =
            SupplierId::parse(required(self.supplier_id.clone(), "bills", key, "supplierId")?)?;
        let due_date = parse_due_date(required(self.due_date.as_deref(), "bills", key, "dueDate")?)
            .map_err(|e| DomainError::validation(format!("bills/{key}: {e}")))?;
        let status = match self.status.as_deref() {
            Some(s) => s.parse::<BillStatus>()?,
            None => BillStatus::default(),
        };

        let mut bill = Bill::new(id, supplier_id, due_date).with_status(status);
        if let Some(balance) = self.balance {
            bill = bill.with_balance(balance);
        }
        if let Some(name) = &self.supplier_name {
            bill = bill.with_supplier_name(name.clone());
        }
        Ok(bill)
    }
}

fn parse_due_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .map_err(|e| format!("invalid dueDate {raw:?}: {e}"))
}
