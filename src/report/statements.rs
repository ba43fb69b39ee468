use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        BankAccount, CategoryRef, DateRange, MonetaryRecord, Payslip, RecordKind, RecordStatus,
        TenantContext, TenantScoped,
    },
    errors::CoreError,
    report::category::{aggregate_by_category, CategoryBucket},
    source::{RecordFilter, RecordSource},
};

/// Revenue, expenses, and payroll for a period, with the derived net.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeStatement {
    pub period: DateRange,
    pub total_revenue: f64,
    pub expense_breakdown: Vec<CategoryBucket>,
    /// Sum of the expense-category buckets, excluding payroll.
    pub total_expenses: f64,
    pub payroll_costs: f64,
    pub net_income: f64,
}

/// Point-in-time assets, liabilities, and the residual equity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub bank_balances: f64,
    pub accounts_receivable: f64,
    pub total_assets: f64,
    pub accounts_payable: f64,
    pub total_liabilities: f64,
    /// Always the residual `total_assets - total_liabilities`, never an
    /// independent computation, so the accounting identity holds exactly.
    pub net_equity: f64,
}

/// Cash in and out for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlow {
    pub period: DateRange,
    pub inflows: f64,
    pub outflows: f64,
    pub net_cash_flow: f64,
}

/// Composes the income statement from already-fetched records.
///
/// Only paid records inside the period count. Recomputed from scratch on
/// every call; there is no cached state to go stale.
pub fn income_statement<F>(
    ctx: &TenantContext,
    period: DateRange,
    invoices: &[MonetaryRecord],
    expenses: &[MonetaryRecord],
    payslips: &[Payslip],
    resolve: F,
) -> IncomeStatement
where
    F: Fn(Uuid) -> Option<CategoryRef>,
{
    let total_revenue: f64 = paid_in_period(ctx, invoices, period, RecordKind::Invoice)
        .map(|r| r.amount)
        .sum();
    let period_expenses: Vec<MonetaryRecord> =
        paid_in_period(ctx, expenses, period, RecordKind::Expense)
            .cloned()
            .collect();
    let expense_breakdown = aggregate_by_category(&period_expenses, resolve);
    let total_expenses: f64 = expense_breakdown.iter().map(|b| b.total).sum();
    let payroll_costs: f64 = payslips
        .iter()
        .filter(|p| {
            p.tenant_id() == ctx.tenant_id
                && p.status == RecordStatus::Paid
                && period.contains(p.date)
        })
        .map(|p| p.net_pay)
        .sum();

    IncomeStatement {
        period,
        total_revenue,
        expense_breakdown,
        total_expenses,
        payroll_costs,
        net_income: total_revenue - total_expenses - payroll_costs,
    }
}

/// Fetches period records through the collaborator and composes the income
/// statement. A failed fetch propagates as `CoreError::DataUnavailable`;
/// missing data is never rendered as zero.
pub fn income_statement_from(
    source: &dyn RecordSource,
    ctx: &TenantContext,
    period: DateRange,
    payslips: &[Payslip],
) -> Result<IncomeStatement, CoreError> {
    let invoices = source.fetch_records(ctx, &period_filter(period, RecordKind::Invoice))?;
    let expenses = source.fetch_records(ctx, &period_filter(period, RecordKind::Expense))?;
    Ok(income_statement(
        ctx,
        period,
        &invoices,
        &expenses,
        payslips,
        |id| source.resolve_category(ctx, id),
    ))
}

/// Composes the balance sheet as of a single date.
///
/// Receivables are invoices still awaiting payment (`Sent`, `Draft`,
/// `Overdue`) dated on/before the as-of date; payables are pending expenses
/// dated on/before it. Cancelled records are excluded from both sides.
pub fn balance_sheet(
    ctx: &TenantContext,
    as_of: NaiveDate,
    accounts: &[BankAccount],
    invoices: &[MonetaryRecord],
    expenses: &[MonetaryRecord],
) -> BalanceSheet {
    let bank_balances: f64 = accounts
        .iter()
        .filter(|a| a.tenant_id() == ctx.tenant_id && a.is_active)
        .map(|a| a.current_balance)
        .sum();
    let accounts_receivable: f64 = invoices
        .iter()
        .filter(|r| {
            r.tenant_id() == ctx.tenant_id
                && r.kind == RecordKind::Invoice
                && r.status.is_receivable()
                && r.date <= as_of
        })
        .map(|r| r.amount)
        .sum();
    let accounts_payable: f64 = expenses
        .iter()
        .filter(|r| {
            r.tenant_id() == ctx.tenant_id
                && r.kind == RecordKind::Expense
                && r.status == RecordStatus::Pending
                && r.date <= as_of
        })
        .map(|r| r.amount)
        .sum();

    let total_assets = bank_balances + accounts_receivable;
    let total_liabilities = accounts_payable;
    BalanceSheet {
        as_of,
        bank_balances,
        accounts_receivable,
        total_assets,
        accounts_payable,
        total_liabilities,
        net_equity: total_assets - total_liabilities,
    }
}

/// Composes the cash-flow statement. Under identical inputs its net equals
/// the income statement's `net_income`.
pub fn cash_flow(
    ctx: &TenantContext,
    period: DateRange,
    invoices: &[MonetaryRecord],
    expenses: &[MonetaryRecord],
    payslips: &[Payslip],
) -> CashFlow {
    let inflows: f64 = paid_in_period(ctx, invoices, period, RecordKind::Invoice)
        .map(|r| r.amount)
        .sum();
    let paid_expenses: f64 = paid_in_period(ctx, expenses, period, RecordKind::Expense)
        .map(|r| r.amount)
        .sum();
    let payroll: f64 = payslips
        .iter()
        .filter(|p| {
            p.tenant_id() == ctx.tenant_id
                && p.status == RecordStatus::Paid
                && period.contains(p.date)
        })
        .map(|p| p.net_pay)
        .sum();
    let outflows = paid_expenses + payroll;
    CashFlow {
        period,
        inflows,
        outflows,
        net_cash_flow: inflows - outflows,
    }
}

fn paid_in_period<'a>(
    ctx: &'a TenantContext,
    records: &'a [MonetaryRecord],
    period: DateRange,
    kind: RecordKind,
) -> impl Iterator<Item = &'a MonetaryRecord> {
    records.iter().filter(move |r| {
        r.tenant_id() == ctx.tenant_id && r.kind == kind && r.is_paid() && period.contains(r.date)
    })
}

fn period_filter(period: DateRange, kind: RecordKind) -> RecordFilter {
    RecordFilter {
        date_from: Some(period.start),
        date_to: Some(period.end),
        status: Some(RecordStatus::Paid),
        kind: Some(kind),
        category_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TenantId;

    fn june() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap()
    }

    fn record(
        tenant: TenantId,
        kind: RecordKind,
        amount: f64,
        status: RecordStatus,
    ) -> MonetaryRecord {
        MonetaryRecord::new(
            tenant,
            kind,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            amount,
            status,
        )
    }

    #[test]
    fn net_income_ties_out_to_revenue_minus_buckets_minus_payroll() {
        let tenant = TenantId::new();
        let ctx = TenantContext::new(tenant);
        let invoices = vec![record(tenant, RecordKind::Invoice, 1000.0, RecordStatus::Paid)];
        let expenses = vec![
            record(tenant, RecordKind::Expense, 300.0, RecordStatus::Paid),
            record(tenant, RecordKind::Expense, 120.0, RecordStatus::Paid),
        ];
        let payslips = vec![Payslip::new(
            tenant,
            NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
            200.0,
            RecordStatus::Paid,
        )];

        let statement = income_statement(&ctx, june(), &invoices, &expenses, &payslips, |_| None);
        let bucket_sum: f64 = statement.expense_breakdown.iter().map(|b| b.total).sum();
        assert_eq!(
            statement.net_income,
            statement.total_revenue - bucket_sum - statement.payroll_costs
        );
        assert_eq!(statement.net_income, 1000.0 - 420.0 - 200.0);
    }

    #[test]
    fn unpaid_and_foreign_records_do_not_count() {
        let tenant = TenantId::new();
        let ctx = TenantContext::new(tenant);
        let invoices = vec![
            record(tenant, RecordKind::Invoice, 500.0, RecordStatus::Paid),
            record(tenant, RecordKind::Invoice, 900.0, RecordStatus::Sent),
            record(TenantId::new(), RecordKind::Invoice, 700.0, RecordStatus::Paid),
        ];
        let statement = income_statement(&ctx, june(), &invoices, &[], &[], |_| None);
        assert_eq!(statement.total_revenue, 500.0);
    }

    #[test]
    fn balance_sheet_identity_holds_by_construction() {
        let tenant = TenantId::new();
        let ctx = TenantContext::new(tenant);
        let accounts = vec![
            BankAccount::new(tenant, "Cheque", 1500.55),
            BankAccount::new(tenant, "Savings", 2000.45),
        ];
        let invoices = vec![record(tenant, RecordKind::Invoice, 333.33, RecordStatus::Sent)];
        let expenses = vec![record(tenant, RecordKind::Expense, 111.11, RecordStatus::Pending)];
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        let sheet = balance_sheet(&ctx, as_of, &accounts, &invoices, &expenses);
        assert_eq!(sheet.total_assets - sheet.total_liabilities, sheet.net_equity);
        assert_eq!(sheet.total_assets, 1500.55 + 2000.45 + 333.33);
        assert_eq!(sheet.total_liabilities, 111.11);
    }

    #[test]
    fn inactive_accounts_and_cancelled_records_are_excluded() {
        let tenant = TenantId::new();
        let ctx = TenantContext::new(tenant);
        let mut dormant = BankAccount::new(tenant, "Dormant", 9999.0);
        dormant.is_active = false;
        let cancelled = record(tenant, RecordKind::Expense, 50.0, RecordStatus::Cancelled);
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        let sheet = balance_sheet(&ctx, as_of, &[dormant], &[], &[cancelled]);
        assert_eq!(sheet.total_assets, 0.0);
        assert_eq!(sheet.total_liabilities, 0.0);
        assert_eq!(sheet.net_equity, 0.0);
    }

    #[test]
    fn future_dated_receivables_are_deferred() {
        let tenant = TenantId::new();
        let ctx = TenantContext::new(tenant);
        let mut later = record(tenant, RecordKind::Invoice, 100.0, RecordStatus::Sent);
        later.date = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        let sheet = balance_sheet(&ctx, as_of, &[], &[later], &[]);
        assert_eq!(sheet.accounts_receivable, 0.0);
    }

    #[test]
    fn cash_flow_equals_net_income_for_the_same_inputs() {
        let tenant = TenantId::new();
        let ctx = TenantContext::new(tenant);
        let invoices = vec![record(tenant, RecordKind::Invoice, 850.0, RecordStatus::Paid)];
        let expenses = vec![record(tenant, RecordKind::Expense, 475.5, RecordStatus::Paid)];
        let payslips = vec![Payslip::new(
            tenant,
            NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            120.0,
            RecordStatus::Paid,
        )];

        let statement = income_statement(&ctx, june(), &invoices, &expenses, &payslips, |_| None);
        let flow = cash_flow(&ctx, june(), &invoices, &expenses, &payslips);
        assert_eq!(flow.net_cash_flow, statement.net_income);
    }
}
