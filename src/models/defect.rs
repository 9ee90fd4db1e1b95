//! Defect model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;
use validator::Validate;

use super::enums::{DefectSeverity, DefectStatus};

/// Defect logged against an inspection
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: DefectSeverity,
    pub status: DefectStatus,
    pub assigned_to: Option<String>,
    /// Inspection item the defect was found on, if any
    pub item_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Create defect request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDefect {
    #[validate(length(min = 1, max = 200, message = "Defect title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: DefectSeverity,
    pub assigned_to: Option<String>,
    pub item_id: Option<Uuid>,
}

/// Update defect request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDefect {
    pub status: Option<DefectStatus>,
    pub severity: Option<DefectSeverity>,
    pub assigned_to: Option<String>,
    pub description: Option<String>,
}
