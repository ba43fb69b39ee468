#![doc(test(attr(deny(warnings))))]

//! Insight Core derives the financial and entity-health metrics that power
//! dashboards and reports across the business-management verticals: category
//! and period breakdowns, financial statements, pipeline health, and fleet
//! cost analysis. Every entry point is a pure function over already-fetched,
//! tenant-scoped records.

pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod report;
pub mod source;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Insight Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
