use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, TenantId, TenantScoped};

/// A sales deal/prospect moving through the pipeline.
///
/// `stage_entered_at` is reset by the external write path on every stage
/// transition; this layer only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub title: String,
    pub stage: DealStage,
    pub estimated_value: f64,
    /// Percent in [0, 100].
    pub win_probability: f64,
    pub stage_entered_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl Deal {
    pub fn new(tenant_id: TenantId, title: impl Into<String>, stage: DealStage) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            title: title.into(),
            stage,
            estimated_value: 0.0,
            win_probability: 0.0,
            stage_entered_at: Utc::now(),
            next_follow_up: None,
            expected_close_date: None,
            last_activity_at: None,
        }
    }
}

impl Identifiable for Deal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for Deal {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl Displayable for Deal {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.title, self.stage.label())
    }
}

/// Ordered pipeline stages. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum DealStage {
    Lead,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl DealStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_stages() {
        assert!(DealStage::Won.is_terminal());
        assert!(DealStage::Lost.is_terminal());
        assert!(!DealStage::Proposal.is_terminal());
    }

    #[test]
    fn stages_are_ordered() {
        assert!(DealStage::Lead < DealStage::Qualified);
        assert!(DealStage::Negotiation < DealStage::Won);
    }
}
