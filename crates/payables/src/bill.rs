use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use costbook_core::{BillId, DomainError, Entity, SupplierId};

/// Supplier bill status lifecycle.
///
/// `Paid` is the only terminal state; every other status still carries an
/// outstanding balance that ages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    Draft,
    #[default]
    Unpaid,
    PartiallyPaid,
    Overdue,
    Paid,
}

impl BillStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, BillStatus::Paid)
    }
}

impl FromStr for BillStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "draft" => Ok(BillStatus::Draft),
            "unpaid" | "open" => Ok(BillStatus::Unpaid),
            "partiallypaid" => Ok(BillStatus::PartiallyPaid),
            "overdue" => Ok(BillStatus::Overdue),
            "paid" => Ok(BillStatus::Paid),
            _ => Err(DomainError::validation(format!("unknown bill status: {s:?}"))),
        }
    }
}

/// Supplier bill (accounts payable document).
///
/// `balance` is optional because bill documents may omit it; aging treats a
/// missing balance as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    id: BillId,
    supplier_id: SupplierId,
    supplier_name: Option<String>,
    due_date: NaiveDate,
    balance: Option<Decimal>,
    status: BillStatus,
}

impl Bill {
    pub fn new(id: BillId, supplier_id: SupplierId, due_date: NaiveDate) -> Self {
        Self {
            id,
            supplier_id,
            supplier_name: None,
            due_date,
            balance: None,
            status: BillStatus::default(),
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_status(mut self, status: BillStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_supplier_name(mut self, name: impl Into<String>) -> Self {
        self.supplier_name = Some(name.into());
        self
    }

    pub fn id_typed(&self) -> &BillId {
        &self.id
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.balance
    }

    /// Outstanding amount used for aging: a missing balance counts as zero.
    pub fn outstanding(&self) -> Decimal {
        self.balance.unwrap_or(Decimal::ZERO)
    }

    pub fn status(&self) -> BillStatus {
        self.status
    }

    /// Whole days past due as of `as_of` (zero or negative when not yet due).
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.due_date).num_days()
    }
}

impl Entity for Bill {
    type Id = BillId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
