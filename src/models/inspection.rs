//! Inspection model: a tracked instance of a checklist template

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;
use validator::Validate;

use super::defect::Defect;
use super::enums::{AssetKind, InspectionStatus, ItemStatus, ResponseType};
use super::evidence::{Photo, Signoff};

/// Inspection record with its owned items, defects and evidence
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: Uuid,
    pub template_id: Uuid,
    pub template_name: String,
    pub template_version: u32,
    pub asset_id: String,
    pub asset_kind: AssetKind,
    pub inspector_id: String,
    pub status: InspectionStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<InspectionItem>,
    #[serde(default)]
    pub defects: Vec<Defect>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub signoffs: Vec<Signoff>,
}

/// Inspection-side copy of a template item
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionItem {
    pub id: Uuid,
    pub template_item_id: Uuid,
    pub section_id: Uuid,
    pub section_name: String,
    pub name: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub response_type: ResponseType,
    pub status: ItemStatus,
    pub notes: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Inspection {
    pub fn item(&self, item_id: Uuid) -> Option<&InspectionItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: Uuid) -> Option<&mut InspectionItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    pub fn defect(&self, defect_id: Uuid) -> Option<&Defect> {
        self.defects.iter().find(|d| d.id == defect_id)
    }

    pub fn defect_mut(&mut self, defect_id: Uuid) -> Option<&mut Defect> {
        self.defects.iter_mut().find(|d| d.id == defect_id)
    }

    /// Defects that are open or being worked on
    pub fn active_defects(&self) -> impl Iterator<Item = &Defect> {
        self.defects.iter().filter(|d| d.status.is_active())
    }

    pub fn progress(&self) -> InspectionProgress {
        InspectionProgress::of(&self.items)
    }

    /// Append to the free-text notes, newline separated
    pub fn append_notes(&mut self, notes: &str) {
        let notes = notes.trim();
        if notes.is_empty() {
            return;
        }
        if self.notes.is_empty() {
            self.notes = notes.to_string();
        } else {
            self.notes.push('\n');
            self.notes.push_str(notes);
        }
    }
}

/// Derived completion figures for an inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionProgress {
    pub total: usize,
    pub completed: usize,
    pub passed: usize,
    pub failed: usize,
    pub na: usize,
    pub pending: usize,
    pub required_pending: usize,
    /// Rounded percentage of addressed items
    pub percent: u8,
}

impl InspectionProgress {
    pub fn of(items: &[InspectionItem]) -> Self {
        let mut progress = Self {
            total: items.len(),
            completed: 0,
            passed: 0,
            failed: 0,
            na: 0,
            pending: 0,
            required_pending: 0,
            percent: 0,
        };

        for item in items {
            match item.status {
                ItemStatus::Pending => {
                    progress.pending += 1;
                    if item.is_required {
                        progress.required_pending += 1;
                    }
                }
                ItemStatus::Passed => progress.passed += 1,
                ItemStatus::Failed => progress.failed += 1,
                ItemStatus::Na => progress.na += 1,
            }
        }
        progress.completed = progress.total - progress.pending;
        progress.percent = percent(progress.completed, progress.total);
        progress
    }

    pub fn is_finished(&self) -> bool {
        self.pending == 0
    }
}

/// round(100 * completed / total), never 100 while something is pending
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (100.0 * completed as f64 / total as f64).round() as u8;
    if completed < total {
        rounded.min(99)
    } else {
        100
    }
}

/// Create inspection request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspection {
    pub template_id: Uuid,
    #[validate(length(min = 1, message = "Asset id is required"))]
    pub asset_id: String,
    #[serde(default)]
    pub asset_kind: AssetKind,
    #[validate(length(min = 1, message = "Inspector id is required"))]
    pub inspector_id: String,
}

/// Update inspection header request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInspection {
    /// Replaces the inspection notes
    pub notes: Option<String>,
    pub inspector_id: Option<String>,
}

/// Update a single inspection item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInspectionItem {
    pub status: Option<ItemStatus>,
    pub notes: Option<String>,
}

/// Query parameters for inspections
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionQuery {
    pub status: Option<InspectionStatus>,
    pub template_id: Option<Uuid>,
    pub asset_id: Option<String>,
    pub inspector_id: Option<String>,
}

impl InspectionQuery {
    pub fn matches(&self, inspection: &Inspection) -> bool {
        self.status.map_or(true, |s| inspection.status == s)
            && self.template_id.map_or(true, |t| inspection.template_id == t)
            && self.asset_id.as_deref().map_or(true, |a| inspection.asset_id == a)
            && self
                .inspector_id
                .as_deref()
                .map_or(true, |i| inspection.inspector_id == i)
    }
}
