pub mod category;
pub mod deal_health;
pub mod fleet;
pub mod statements;
pub mod vat;

pub use category::{aggregate_by_category, CategoryBucket};
pub use deal_health::{deal_health, DealHealth, HealthLevel};
pub use fleet::{
    cost_per_km, fleet_alerts, replacement_recommendation, total_cost_of_ownership,
    vehicle_health_score, AlertCategory, AlertSeverity, FleetAlert, FleetRecords, Recommendation,
};
pub use statements::{
    balance_sheet, cash_flow, income_statement, income_statement_from, BalanceSheet, CashFlow,
    IncomeStatement,
};
pub use vat::{tax_component, vat_monthly_breakdown, VatMonthBucket};
