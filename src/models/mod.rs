//! Data models for the PDI engine

pub mod defect;
pub mod enums;
pub mod event;
pub mod evidence;
pub mod inspection;
pub mod task;
pub mod template;

// Re-export commonly used types
pub use defect::{CreateDefect, Defect, UpdateDefect};
pub use enums::{
    AssetKind, DefectSeverity, DefectStatus, FollowUpPriority, InspectionStatus, ItemStatus,
    ResponseType, SignoffOutcome, SignoffRole, TaskPriority,
};
pub use event::{EngineEvent, Notification, NotificationLevel};
pub use evidence::{AddPhoto, AddSignoff, Photo, Signoff};
pub use inspection::{
    CreateInspection, Inspection, InspectionItem, InspectionProgress, InspectionQuery,
    UpdateInspection, UpdateInspectionItem,
};
pub use task::{TaskDraft, SOURCE_TYPE_PDI_INSPECTION};
pub use template::{
    CreateTemplate, Section, SectionInput, Template, TemplateItem, TemplateItemInput,
    TemplateQuery, UpdateTemplate,
};
