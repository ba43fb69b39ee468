use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{CategoryRef, MonetaryRecord, RecordKind, RecordStatus, TenantContext},
    errors::CoreError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Abstraction over the hosted backend that owns persistence.
///
/// Implementations must scope every query strictly to the tenant in the
/// context. A failed fetch surfaces as `CoreError::DataUnavailable`, never as
/// an empty result set.
pub trait RecordSource: Send + Sync {
    fn fetch_records(
        &self,
        ctx: &TenantContext,
        filter: &RecordFilter,
    ) -> Result<Vec<MonetaryRecord>>;

    fn resolve_category(&self, ctx: &TenantContext, category_id: Uuid) -> Option<CategoryRef>;
}

/// Narrow filter shape mirrored from the backend query surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl RecordFilter {
    pub fn matches(&self, record: &MonetaryRecord) -> bool {
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if record.category_id != Some(category_id) {
                return false;
            }
        }
        true
    }
}

/// In-memory source used by tests and local tooling. Filters by tenant so
/// cross-tenant isolation stays observable.
#[derive(Default)]
pub struct InMemorySource {
    records: Vec<MonetaryRecord>,
    categories: Vec<crate::domain::Category>,
    /// When set, every fetch fails; simulates a backend outage.
    unavailable: Option<String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: Vec<MonetaryRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_categories(mut self, categories: Vec<crate::domain::Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn fail_with(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }
}

impl RecordSource for InMemorySource {
    fn fetch_records(
        &self,
        ctx: &TenantContext,
        filter: &RecordFilter,
    ) -> Result<Vec<MonetaryRecord>> {
        if let Some(reason) = &self.unavailable {
            return Err(CoreError::DataUnavailable(reason.clone()));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| record.tenant_id == ctx.tenant_id)
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn resolve_category(&self, ctx: &TenantContext, category_id: Uuid) -> Option<CategoryRef> {
        self.categories
            .iter()
            .find(|category| category.tenant_id == ctx.tenant_id && category.id == category_id)
            .map(|category| category.as_ref_value())
    }
}
