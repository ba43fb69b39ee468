use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    config::TenantSettings,
    domain::{DateRange, MonetaryRecord, RecordStatus, TenantContext, TenantScoped},
};

/// Per-month VAT position.
///
/// `net >= 0` means payable to the revenue authority, `net < 0` means a
/// refund is due. The sign convention carries through to `net_label`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VatMonthBucket {
    /// First day of the calendar month.
    pub month_start: NaiveDate,
    /// VAT collected on sales (tax-inclusive invoice totals).
    pub output_tax: f64,
    /// VAT paid on purchases.
    pub input_tax: f64,
    pub net: f64,
}

impl VatMonthBucket {
    pub fn net_label(&self) -> &'static str {
        if self.net >= 0.0 {
            "Payable"
        } else {
            "Refund"
        }
    }
}

/// Extracts the tax component of a tax-inclusive total.
///
/// A 115.00 invoice at 15% contains 115 * 15 / 115 = 15.00 of tax.
pub fn tax_component(amount: f64, rate: f64) -> f64 {
    amount * rate / (100.0 + rate)
}

/// Buckets invoices and expenses into calendar months and computes the VAT
/// position per month.
///
/// Every month whose range intersects the period appears, zero-filled when no
/// record matches, in chronological order. Invoices use their per-record rate
/// when present, otherwise the tenant default; expenses carry no per-record
/// rate and always use the tenant default. Cancelled records never count.
pub fn vat_monthly_breakdown(
    ctx: &TenantContext,
    invoices: &[MonetaryRecord],
    expenses: &[MonetaryRecord],
    period: DateRange,
    settings: &TenantSettings,
) -> Vec<VatMonthBucket> {
    let mut buckets: Vec<VatMonthBucket> = months_in_range(period)
        .into_iter()
        .map(|month_start| VatMonthBucket {
            month_start,
            output_tax: 0.0,
            input_tax: 0.0,
            net: 0.0,
        })
        .collect();

    for invoice in tenant_records(ctx, invoices, period) {
        let rate = invoice.tax_rate.unwrap_or(settings.default_tax_rate);
        if let Some(bucket) = bucket_for(&mut buckets, invoice.date) {
            bucket.output_tax += tax_component(invoice.amount, rate);
        }
    }
    for expense in tenant_records(ctx, expenses, period) {
        if let Some(bucket) = bucket_for(&mut buckets, expense.date) {
            bucket.input_tax += tax_component(expense.amount, settings.default_tax_rate);
        }
    }
    for bucket in &mut buckets {
        bucket.net = bucket.output_tax - bucket.input_tax;
    }
    buckets
}

/// First day of every calendar month intersecting the period, ascending.
pub fn months_in_range(period: DateRange) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut cursor = first_of_month(period.start);
    while cursor <= period.end {
        months.push(cursor);
        cursor = next_month(cursor);
    }
    months
}

fn tenant_records<'a>(
    ctx: &'a TenantContext,
    records: &'a [MonetaryRecord],
    period: DateRange,
) -> impl Iterator<Item = &'a MonetaryRecord> {
    records.iter().filter(move |record| {
        record.tenant_id() == ctx.tenant_id
            && record.status != RecordStatus::Cancelled
            && period.contains(record.date)
    })
}

fn bucket_for(buckets: &mut [VatMonthBucket], date: NaiveDate) -> Option<&mut VatMonthBucket> {
    let month = first_of_month(date);
    buckets.iter_mut().find(|b| b.month_start == month)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn next_month(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(month_start)
}
