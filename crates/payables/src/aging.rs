//! Accounts payable aging.
//!
//! Buckets the outstanding balance of unsettled supplier bills by how many
//! whole days they are past due.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{SupplierId, ValueObject};

use crate::bill::Bill;

/// Aging bucket a bill falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "1-30")]
    Days1To30,
    #[serde(rename = "31-60")]
    Days31To60,
    #[serde(rename = "61-90")]
    Days61To90,
    #[serde(rename = "over90")]
    Over90,
}

impl AgingBucket {
    /// Classify a days-overdue count. Boundaries are inclusive on the upper end.
    pub fn for_days(days_overdue: i64) -> Self {
        match days_overdue {
            d if d <= 0 => AgingBucket::Current,
            d if d <= 30 => AgingBucket::Days1To30,
            d if d <= 60 => AgingBucket::Days31To60,
            d if d <= 90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }
}

/// Outstanding totals per aging bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    pub current: Decimal,
    #[serde(rename = "1-30")]
    pub days_1_30: Decimal,
    #[serde(rename = "31-60")]
    pub days_31_60: Decimal,
    #[serde(rename = "61-90")]
    pub days_61_90: Decimal,
    #[serde(rename = "over90")]
    pub over_90: Decimal,
}

impl ValueObject for AgingBuckets {}

impl AgingBuckets {
    pub fn get(&self, bucket: AgingBucket) -> Decimal {
        match bucket {
            AgingBucket::Current => self.current,
            AgingBucket::Days1To30 => self.days_1_30,
            AgingBucket::Days31To60 => self.days_31_60,
            AgingBucket::Days61To90 => self.days_61_90,
            AgingBucket::Over90 => self.over_90,
        }
    }

    fn slot_mut(&mut self, bucket: AgingBucket) -> &mut Decimal {
        match bucket {
            AgingBucket::Current => &mut self.current,
            AgingBucket::Days1To30 => &mut self.days_1_30,
            AgingBucket::Days31To60 => &mut self.days_31_60,
            AgingBucket::Days61To90 => &mut self.days_61_90,
            AgingBucket::Over90 => &mut self.over_90,
        }
    }

    /// Add one bill's outstanding balance. Settled bills are ignored.
    pub fn record(&mut self, bill: &Bill, as_of: NaiveDate) {
        if bill.status().is_settled() {
            return;
        }
        let slot = self.slot_mut(AgingBucket::for_days(bill.days_overdue(as_of)));
        *slot = slot.saturating_add(bill.outstanding());
    }

    pub fn total(&self) -> Decimal {
        self.current
            .saturating_add(self.days_1_30)
            .saturating_add(self.days_31_60)
            .saturating_add(self.days_61_90)
            .saturating_add(self.over_90)
    }
}

/// Bucket all unsettled bills as of `as_of`.
pub fn bucketize(bills: &[Bill], as_of: NaiveDate) -> AgingBuckets {
    bills.iter().fold(AgingBuckets::default(), |mut buckets, bill| {
        buckets.record(bill, as_of);
        buckets
    })
}

/// Aging for a single supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierAging {
    pub supplier_id: SupplierId,
    pub supplier_name: Option<String>,
    pub buckets: AgingBuckets,
}

impl ValueObject for SupplierAging {}

/// Bucket unsettled bills per supplier, ordered by supplier id.
///
/// Suppliers whose bills are all settled are not listed.
pub fn bucketize_by_supplier(bills: &[Bill], as_of: NaiveDate) -> Vec<SupplierAging> {
    let mut by_supplier: BTreeMap<&SupplierId, SupplierAging> = BTreeMap::new();

    for bill in bills.iter().filter(|b| !b.status().is_settled()) {
        let entry = by_supplier
            .entry(bill.supplier_id())
            .or_insert_with(|| SupplierAging {
                supplier_id: bill.supplier_id().clone(),
                supplier_name: None,
                buckets: AgingBuckets::default(),
            });
        if entry.supplier_name.is_none() {
            entry.supplier_name = bill.supplier_name().map(str::to_string);
        }
        entry.buckets.record(bill, as_of);
    }

    by_supplier.into_values().collect()
}
