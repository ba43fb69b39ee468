use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, TenantId, TenantScoped};

/// A single money movement: an invoice, an expense, or a bank transaction.
///
/// `amount` is always non-negative; direction is implied by `kind`, never by
/// a negative amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonetaryRecord {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    /// Per-record tax rate in percent, carried by tax-inclusive invoices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MonetaryRecord {
    pub fn new(
        tenant_id: TenantId,
        kind: RecordKind,
        date: NaiveDate,
        amount: f64,
        status: RecordStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            kind,
            date,
            amount,
            status,
            category_id: None,
            account_id: None,
            tax_rate: None,
            notes: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status, RecordStatus::Paid)
    }
}

impl Identifiable for MonetaryRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for MonetaryRecord {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// What kind of money movement a record represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordKind {
    Invoice,
    Expense,
    Transaction,
}

/// Lifecycle status shared across invoices, expenses, and transactions.
///
/// `Sent`, `Draft`, and `Overdue` only occur on invoices; expenses move
/// between `Pending`, `Paid`, and `Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordStatus {
    Pending,
    Paid,
    Cancelled,
    Sent,
    Draft,
    Overdue,
}

impl RecordStatus {
    /// Statuses that count toward accounts receivable on the balance sheet.
    pub fn is_receivable(&self) -> bool {
        matches!(self, Self::Sent | Self::Draft | Self::Overdue)
    }
}

/// A bank account tracked for balance-sheet assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankAccount {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub current_balance: f64,
    pub is_active: bool,
    /// The external write path keeps at most one primary per tenant; the
    /// aggregation layer tolerates zero or many.
    pub is_primary: bool,
}

impl BankAccount {
    pub fn new(tenant_id: TenantId, name: impl Into<String>, current_balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.into(),
            current_balance,
            is_active: true,
            is_primary: false,
        }
    }
}

impl Identifiable for BankAccount {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for BankAccount {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl Displayable for BankAccount {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.name, self.current_balance)
    }
}

/// Net pay issued to an employee for a pay period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payslip {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub date: NaiveDate,
    pub net_pay: f64,
    pub status: RecordStatus,
}

impl Payslip {
    pub fn new(tenant_id: TenantId, date: NaiveDate, net_pay: f64, status: RecordStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            date,
            net_pay,
            status,
        }
    }
}

impl TenantScoped for Payslip {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
