use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CategoryRef, MonetaryRecord};

/// Bucket name applied when a record's category cannot be resolved.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One row of a category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBucket {
    pub name: String,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Groups records by resolved category name and sums their amounts.
///
/// Buckets sort descending by total, ties broken by name ascending, so the
/// output is deterministic. Empty input yields an empty list, never a
/// zero-amount "Uncategorized" bucket. Totals are exact IEEE-754 sums;
/// callers round only at display time.
pub fn aggregate_by_category<F>(records: &[MonetaryRecord], resolve: F) -> Vec<CategoryBucket>
where
    F: Fn(Uuid) -> Option<CategoryRef>,
{
    let mut buckets: HashMap<String, CategoryBucket> = HashMap::new();
    for record in records {
        let resolved = record.category_id.and_then(&resolve);
        let (name, color) = match resolved {
            Some(category) => (category.name, category.color),
            None => (UNCATEGORIZED.to_string(), None),
        };
        let entry = buckets.entry(name.clone()).or_insert(CategoryBucket {
            name,
            total: 0.0,
            color,
        });
        entry.total += record.amount;
    }
    let mut out: Vec<CategoryBucket> = buckets.into_values().collect();
    out.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    out
}
