//! Checklist template model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;
use validator::Validate;

use super::enums::ResponseType;

/// Reusable checklist template
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    /// Shared by a template and every version forked from it
    pub lineage_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Starts at 1; a content edit takes the next version of the lineage
    pub version: u32,
    pub is_active: bool,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered group of checklist items
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<TemplateItem>,
}

/// Single checklist entry of a template
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_required: bool,
    #[serde(default)]
    pub response_type: ResponseType,
}

impl Template {
    /// Iterate items across sections in checklist order
    pub fn items(&self) -> impl Iterator<Item = (&Section, &TemplateItem)> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter().map(move |item| (section, item)))
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn required_item_count(&self) -> usize {
        self.items().filter(|(_, item)| item.is_required).count()
    }
}

/// Create template request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 200, message = "Template name must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
}

/// Section as supplied by an administrator; ids are generated when absent
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Section name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<TemplateItemInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItemInput {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub response_type: ResponseType,
}

/// Update template request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 200, message = "Template name must be 1-200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub sections: Option<Vec<SectionInput>>,
}

impl UpdateTemplate {
    /// True when the update touches checklist content rather than only the active flag
    pub fn changes_content(&self) -> bool {
        self.name.is_some() || self.description.is_some() || self.sections.is_some()
    }
}

/// Query parameters for listing templates
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateQuery {
    pub active: Option<bool>,
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
}

fn default_active() -> bool {
    true
}
