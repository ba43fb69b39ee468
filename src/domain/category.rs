use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity, TenantId, TenantScoped};

/// Categorises monetary records for breakdowns and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_tag: Option<String>,
}

impl Category {
    pub fn new(tenant_id: TenantId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.into(),
            color_tag: None,
            icon_tag: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color_tag = Some(color.into());
        self
    }

    pub fn as_ref_value(&self) -> CategoryRef {
        CategoryRef {
            name: self.name.clone(),
            color: self.color_tag.clone(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TenantScoped for Category {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Resolved category reference handed to aggregators by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
