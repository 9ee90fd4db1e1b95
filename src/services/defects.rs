//! Defect tracker

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::notifications::EventBus;
use crate::{
    error::{AppError, AppResult},
    models::{
        defect::{CreateDefect, Defect, UpdateDefect},
        enums::DefectStatus,
        event::EngineEvent,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DefectsService {
    repository: Repository,
    events: EventBus,
}

impl DefectsService {
    pub fn new(repository: Repository, events: EventBus) -> Self {
        Self { repository, events }
    }

    /// Log a defect. Allowed in every inspection status; item statuses are left alone.
    pub async fn create(&self, inspection_id: Uuid, data: &CreateDefect) -> AppResult<Defect> {
        data.validate()?;
        let title = data.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Defect title cannot be empty".to_string()));
        }

        let (inspection, defect) = self
            .repository
            .inspections_modify(inspection_id, |inspection| {
                if let Some(item_id) = data.item_id {
                    inspection.item(item_id).ok_or(AppError::ItemNotFound(item_id))?;
                }
                let now = Utc::now();
                let defect = Defect {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    description: data.description.trim().to_string(),
                    severity: data.severity,
                    status: DefectStatus::Open,
                    assigned_to: assignee(data.assigned_to.as_deref()),
                    item_id: data.item_id,
                    created_at: now,
                    updated_at: now,
                    resolved_at: None,
                };
                inspection.defects.push(defect.clone());
                Ok(defect)
            })
            .await?;

        tracing::info!(
            "Logged {} defect {} on inspection {} ({})",
            defect.severity,
            defect.id,
            inspection_id,
            inspection.status
        );
        self.events.publish(EngineEvent::inspection_saved(&inspection));
        Ok(defect)
    }

    /// Change defect status, severity, assignment or description
    pub async fn update(
        &self,
        inspection_id: Uuid,
        defect_id: Uuid,
        data: &UpdateDefect,
    ) -> AppResult<Defect> {
        let (inspection, defect) = self
            .repository
            .inspections_modify(inspection_id, |inspection| {
                let defect = inspection
                    .defect_mut(defect_id)
                    .ok_or(AppError::DefectNotFound(defect_id))?;
                apply_defect_update(defect, data, Utc::now())?;
                Ok(defect.clone())
            })
            .await?;

        tracing::info!(
            "Defect {} on inspection {} is {}",
            defect_id,
            inspection_id,
            defect.status
        );
        self.events.publish(EngineEvent::inspection_saved(&inspection));
        Ok(defect)
    }
}

fn assignee(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn apply_defect_update(defect: &mut Defect, data: &UpdateDefect, now: DateTime<Utc>) -> AppResult<()> {
    if defect.status == DefectStatus::Closed {
        return Err(AppError::InvalidTransition(format!(
            "defect {} is closed",
            defect.id
        )));
    }

    if let Some(status) = data.status {
        match status {
            DefectStatus::Resolved => {
                if defect.status != DefectStatus::Resolved {
                    defect.resolved_at = Some(now);
                }
            }
            DefectStatus::Open | DefectStatus::InProgress => defect.resolved_at = None,
            // closing keeps the resolution time, if any
            DefectStatus::Closed => {}
        }
        defect.status = status;
    }
    if let Some(severity) = data.severity {
        defect.severity = severity;
    }
    if let Some(ref assigned_to) = data.assigned_to {
        defect.assigned_to = assignee(Some(assigned_to.as_str()));
    }
    if let Some(ref description) = data.description {
        defect.description = description.trim().to_string();
    }
    defect.updated_at = now;
    Ok(())
}
