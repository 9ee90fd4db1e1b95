//! Closed status and classification enums shared by the PDI models

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InspectionStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    InProgress,
    Completed,
    Approved,
    Rejected,
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InspectionStatus::InProgress => "in_progress",
            InspectionStatus::Completed => "completed",
            InspectionStatus::Approved => "approved",
            InspectionStatus::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Check result of a single inspection item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    Passed,
    Failed,
    Na,
}

impl ItemStatus {
    /// Anything other than pending counts as addressed
    pub fn is_addressed(self) -> bool {
        !matches!(self, ItemStatus::Pending)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Passed => "passed",
            ItemStatus::Failed => "failed",
            ItemStatus::Na => "na",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ResponseType
// ---------------------------------------------------------------------------

/// Expected answer shape of a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    PassFail,
    #[default]
    PassFailNa,
    /// Free-text answer carried in the item notes
    Text,
}

impl ResponseType {
    pub fn accepts(self, status: ItemStatus) -> bool {
        match self {
            ResponseType::PassFail => status != ItemStatus::Na,
            ResponseType::PassFailNa | ResponseType::Text => true,
        }
    }
}

// ---------------------------------------------------------------------------
// DefectSeverity
// ---------------------------------------------------------------------------

/// Defect severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DefectSeverity {
    pub fn follow_up_priority(self) -> FollowUpPriority {
        match self {
            DefectSeverity::Critical | DefectSeverity::High => FollowUpPriority::Urgent,
            DefectSeverity::Medium => FollowUpPriority::Normal,
            DefectSeverity::Low => FollowUpPriority::Informational,
        }
    }
}

impl std::fmt::Display for DefectSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DefectSeverity::Low => "low",
            DefectSeverity::Medium => "medium",
            DefectSeverity::High => "high",
            DefectSeverity::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// DefectStatus
// ---------------------------------------------------------------------------

/// Defect workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl DefectStatus {
    /// Open and in-progress defects still need work
    pub fn is_active(self) -> bool {
        matches!(self, DefectStatus::Open | DefectStatus::InProgress)
    }
}

impl std::fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DefectStatus::Open => "open",
            DefectStatus::InProgress => "in_progress",
            DefectStatus::Resolved => "resolved",
            DefectStatus::Closed => "closed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// FollowUpPriority
// ---------------------------------------------------------------------------

/// Follow-up urgency derived from a defect severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpPriority {
    Informational,
    Normal,
    Urgent,
}

// ---------------------------------------------------------------------------
// SignoffRole / SignoffOutcome
// ---------------------------------------------------------------------------

/// Role under which a sign-off is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignoffRole {
    Inspector,
    Technician,
    Supervisor,
    Manager,
    Customer,
}

impl std::fmt::Display for SignoffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SignoffRole::Inspector => "inspector",
            SignoffRole::Technician => "technician",
            SignoffRole::Supervisor => "supervisor",
            SignoffRole::Manager => "manager",
            SignoffRole::Customer => "customer",
        };
        write!(f, "{}", label)
    }
}

/// Decision carried by a sign-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignoffOutcome {
    Approve,
    Reject,
    /// Recorded for the ledger only
    Acknowledge,
}

// ---------------------------------------------------------------------------
// AssetKind
// ---------------------------------------------------------------------------

/// Kind of asset an inspection targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    #[default]
    Vehicle,
    Home,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetKind::Vehicle => "vehicle",
            AssetKind::Home => "home",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// TaskPriority
// ---------------------------------------------------------------------------

/// Priority of a follow-up task handed to the task center
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}
