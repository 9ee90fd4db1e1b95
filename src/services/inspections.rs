//! Inspection factory and state manager

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::{
    notifications::EventBus,
    workflow::{self, Transition},
};
use crate::{
    config::InspectionsConfig,
    error::{AppError, AppResult},
    models::{
        enums::{AssetKind, InspectionStatus, ItemStatus},
        event::EngineEvent,
        inspection::{
            CreateInspection, Inspection, InspectionItem, InspectionProgress, InspectionQuery,
            UpdateInspection, UpdateInspectionItem,
        },
        template::Template,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct InspectionsService {
    repository: Repository,
    events: EventBus,
    config: InspectionsConfig,
}

impl InspectionsService {
    pub fn new(repository: Repository, events: EventBus, config: InspectionsConfig) -> Self {
        Self {
            repository,
            events,
            config,
        }
    }

    /// List inspections
    pub async fn list(&self, query: &InspectionQuery) -> AppResult<Vec<Inspection>> {
        self.repository.inspections_list(query).await
    }

    /// Get inspection by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Inspection> {
        self.repository.inspections_get(id).await
    }

    /// Completion figures for an inspection
    pub async fn progress(&self, id: Uuid) -> AppResult<InspectionProgress> {
        Ok(self.repository.inspections_get(id).await?.progress())
    }

    /// Start an inspection of an asset from an active template
    pub async fn create(&self, data: &CreateInspection) -> AppResult<Inspection> {
        data.validate()?;
        let asset_id = required(&data.asset_id, "Asset id")?;
        let inspector_id = required(&data.inspector_id, "Inspector id")?;

        // Held so the template cannot be edited in place while it is copied
        let _guard = self.repository.lock_templates().await;
        let template = self.repository.templates_get(data.template_id).await?;
        if !template.is_active {
            return Err(AppError::Validation(format!(
                "Template '{}' is not active",
                template.name
            )));
        }

        let inspection = instantiate(&template, asset_id, data.asset_kind, inspector_id, Utc::now());
        let inspection = self.repository.inspections_insert(inspection).await?;
        tracing::info!(
            "Created inspection {} for {} {} from template {} v{} ({} item(s))",
            inspection.id,
            inspection.asset_kind,
            inspection.asset_id,
            template.id,
            template.version,
            inspection.items.len()
        );
        self.publish(&inspection);
        Ok(inspection)
    }

    /// Update inspection header fields
    pub async fn update(&self, id: Uuid, data: &UpdateInspection) -> AppResult<Inspection> {
        let (inspection, _) = self
            .repository
            .inspections_modify(id, |inspection| {
                if let Some(ref inspector_id) = data.inspector_id {
                    if inspection.status != InspectionStatus::InProgress {
                        return Err(AppError::InvalidTransition(format!(
                            "cannot reassign an inspection that is {}",
                            inspection.status
                        )));
                    }
                    inspection.inspector_id = required(inspector_id, "Inspector id")?;
                }
                if let Some(ref notes) = data.notes {
                    inspection.notes = notes.trim().to_string();
                }
                Ok(())
            })
            .await?;

        tracing::debug!("Updated inspection {}", id);
        self.publish(&inspection);
        Ok(inspection)
    }

    /// Set the status and/or notes of one inspection item
    pub async fn update_item(
        &self,
        id: Uuid,
        item_id: Uuid,
        data: &UpdateInspectionItem,
    ) -> AppResult<Inspection> {
        let (inspection, status) = self
            .repository
            .inspections_modify(id, |inspection| {
                if inspection.status != InspectionStatus::InProgress {
                    return Err(AppError::InvalidTransition(format!(
                        "items of an inspection that is {} cannot change",
                        inspection.status
                    )));
                }
                let item = inspection
                    .item_mut(item_id)
                    .ok_or(AppError::ItemNotFound(item_id))?;
                apply_item_update(item, data, Utc::now())?;
                Ok(item.status)
            })
            .await?;

        tracing::debug!(
            "Inspection {} item {} is {} ({}% complete)",
            id,
            item_id,
            status,
            inspection.progress().percent
        );
        self.publish(&inspection);
        Ok(inspection)
    }

    /// Mark an in-progress inspection completed
    pub async fn complete(&self, id: Uuid, notes: Option<&str>) -> AppResult<Inspection> {
        let strict = self.config.require_required_items_resolved;
        let (inspection, _) = self
            .repository
            .inspections_modify(id, |inspection| {
                let next = workflow::apply(inspection.status, Transition::Complete)?;
                if strict {
                    let required_pending = inspection.progress().required_pending;
                    if required_pending > 0 {
                        return Err(AppError::Validation(format!(
                            "{} required item(s) are still pending",
                            required_pending
                        )));
                    }
                }
                inspection.status = next;
                inspection.completed_at = Some(Utc::now());
                if let Some(notes) = notes {
                    inspection.append_notes(notes);
                }
                Ok(())
            })
            .await
            .inspect_err(|e| tracing::warn!("Inspection {} not completed: {}", id, e))?;

        let progress = inspection.progress();
        if progress.is_finished() {
            tracing::info!("Completed inspection {}", id);
        } else {
            tracing::info!(
                "Completed inspection {} at {}% with {} item(s) pending",
                id,
                progress.percent,
                progress.pending
            );
        }
        self.publish(&inspection);
        Ok(inspection)
    }

    /// Administrative reopen of a rejected inspection
    pub async fn reopen(&self, id: Uuid) -> AppResult<Inspection> {
        let (inspection, _) = self
            .repository
            .inspections_modify(id, |inspection| {
                inspection.status = workflow::apply(inspection.status, Transition::Reopen)?;
                inspection.completed_at = None;
                Ok(())
            })
            .await?;

        tracing::info!("Reopened inspection {}", id);
        self.publish(&inspection);
        Ok(inspection)
    }

    fn publish(&self, inspection: &Inspection) {
        self.events.publish(EngineEvent::inspection_saved(inspection));
    }
}

/// Snapshot every template item into a pending inspection item
pub fn instantiate(
    template: &Template,
    asset_id: String,
    asset_kind: AssetKind,
    inspector_id: String,
    now: DateTime<Utc>,
) -> Inspection {
    let items = template
        .items()
        .map(|(section, item)| InspectionItem {
            id: Uuid::new_v4(),
            template_item_id: item.id,
            section_id: section.id,
            section_name: section.name.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            is_required: item.is_required,
            response_type: item.response_type,
            status: ItemStatus::Pending,
            notes: None,
            updated_at: None,
        })
        .collect();

    Inspection {
        id: Uuid::new_v4(),
        template_id: template.id,
        template_name: template.name.clone(),
        template_version: template.version,
        asset_id,
        asset_kind,
        inspector_id,
        status: InspectionStatus::InProgress,
        started_at: now,
        completed_at: None,
        notes: String::new(),
        updated_at: now,
        items,
        defects: Vec::new(),
        photos: Vec::new(),
        signoffs: Vec::new(),
    }
}

fn apply_item_update(
    item: &mut InspectionItem,
    data: &UpdateInspectionItem,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if let Some(status) = data.status {
        if !item.response_type.accepts(status) {
            return Err(AppError::Validation(format!(
                "Item '{}' does not accept status {}",
                item.name, status
            )));
        }
        item.status = status;
    }
    if let Some(ref notes) = data.notes {
        let notes = notes.trim();
        item.notes = (!notes.is_empty()).then(|| notes.to_string());
    }
    item.updated_at = Some(now);
    Ok(())
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(value.to_string())
}
