//! Follow-up task draft handed to the external task center

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::TaskPriority;

pub const SOURCE_TYPE_PDI_INSPECTION: &str = "pdi_inspection";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    pub source_id: Uuid,
    pub source_type: String,
    /// Free-form fields for the receiving task system
    pub custom_fields: IndexMap<String, serde_json::Value>,
}
