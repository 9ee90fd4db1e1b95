//! Change events and user-facing notifications

use serde::Serialize;
use uuid::Uuid;

use super::inspection::Inspection;
use super::template::Template;

/// Broadcast after every successful mutation, carrying a snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    TemplateSaved { template: Box<Template> },
    TemplateDeleted { id: Uuid },
    InspectionSaved { inspection: Box<Inspection> },
}

impl EngineEvent {
    pub fn template_saved(template: &Template) -> Self {
        EngineEvent::TemplateSaved {
            template: Box::new(template.clone()),
        }
    }

    pub fn inspection_saved(inspection: &Inspection) -> Self {
        EngineEvent::InspectionSaved {
            inspection: Box::new(inspection.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// Feedback for the operator who issued an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Failure,
            message: message.into(),
        }
    }
}
