//! Engine facade: the operations exposed to the surrounding application.
//!
//! Every mutating call reports its outcome to the notification sink and
//! then hands the result back unchanged. Reads are not reported.

use std::sync::Arc;

use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{AppResult, ErrorKind},
    models::{
        AddPhoto, AddSignoff, CreateDefect, CreateInspection, CreateTemplate, Defect,
        EngineEvent, Inspection, InspectionProgress, InspectionQuery, Notification, Photo,
        TaskDraft, Template, TemplateQuery, UpdateDefect, UpdateInspection,
        UpdateInspectionItem, UpdateTemplate,
    },
    repository::Repository,
    services::{notifications::NotificationSink, Integrations, Services},
};

/// Engine state shared by all callers
#[derive(Clone)]
pub struct Engine {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    notifications: Arc<dyn NotificationSink>,
}

impl Engine {
    pub fn new(config: AppConfig, repository: Repository, integrations: Integrations) -> Self {
        let services = Services::new(repository, &config, &integrations);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            notifications: integrations.notifications,
        }
    }

    /// Engine over in-memory stores with default collaborators
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Repository::in_memory(), Integrations::default())
    }

    /// Change events published after this call
    pub fn subscribe(&self) -> BroadcastStream<EngineEvent> {
        self.services.events.subscribe()
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    pub async fn create_template(&self, data: &CreateTemplate) -> AppResult<Template> {
        let result = self.services.templates.create(data).await;
        self.report(result, "create template", |t| format!("Template '{}' created", t.name))
    }

    pub async fn update_template(&self, id: Uuid, data: &UpdateTemplate) -> AppResult<Template> {
        let result = self.services.templates.update(id, data).await;
        self.report(result, "update template", |t| {
            format!("Template '{}' saved as version {}", t.name, t.version)
        })
    }

    pub async fn delete_template(&self, id: Uuid) -> AppResult<()> {
        let result = self.services.templates.delete(id).await;
        self.report(result, "delete template", |_| "Template deleted".to_string())
    }

    pub async fn duplicate_template(&self, id: Uuid) -> AppResult<Template> {
        let result = self.services.templates.duplicate(id).await;
        self.report(result, "duplicate template", |t| format!("Template '{}' created", t.name))
    }

    pub async fn get_template(&self, id: Uuid) -> AppResult<Template> {
        self.services.templates.get_by_id(id).await
    }

    pub async fn list_templates(&self, query: &TemplateQuery) -> AppResult<Vec<Template>> {
        self.services.templates.list(query).await
    }

    // -----------------------------------------------------------------------
    // Inspections
    // -----------------------------------------------------------------------

    pub async fn create_inspection(&self, data: &CreateInspection) -> AppResult<Inspection> {
        let result = self.services.inspections.create(data).await;
        self.report(result, "start inspection", |i| {
            format!("Inspection started for {}", i.asset_id)
        })
    }

    pub async fn update_inspection(&self, id: Uuid, data: &UpdateInspection) -> AppResult<Inspection> {
        let result = self.services.inspections.update(id, data).await;
        self.report(result, "update inspection", |_| "Inspection updated".to_string())
    }

    pub async fn update_inspection_item(
        &self,
        id: Uuid,
        item_id: Uuid,
        data: &UpdateInspectionItem,
    ) -> AppResult<Inspection> {
        let result = self.services.inspections.update_item(id, item_id, data).await;
        self.report(result, "update inspection item", |i| {
            format!("Item updated ({}% complete)", i.progress().percent)
        })
    }

    pub async fn complete_inspection(&self, id: Uuid, notes: Option<&str>) -> AppResult<Inspection> {
        let result = self.services.inspections.complete(id, notes).await;
        self.report(result, "complete inspection", |_| "Inspection completed".to_string())
    }

    pub async fn reopen_inspection(&self, id: Uuid) -> AppResult<Inspection> {
        let result = self.services.inspections.reopen(id).await;
        self.report(result, "reopen inspection", |_| "Inspection reopened".to_string())
    }

    pub async fn get_inspection_by_id(&self, id: Uuid) -> AppResult<Inspection> {
        self.services.inspections.get_by_id(id).await
    }

    pub async fn list_inspections(&self, query: &InspectionQuery) -> AppResult<Vec<Inspection>> {
        self.services.inspections.list(query).await
    }

    pub async fn inspection_progress(&self, id: Uuid) -> AppResult<InspectionProgress> {
        self.services.inspections.progress(id).await
    }

    // -----------------------------------------------------------------------
    // Defects & evidence
    // -----------------------------------------------------------------------

    pub async fn create_defect(&self, inspection_id: Uuid, data: &CreateDefect) -> AppResult<Defect> {
        let result = self.services.defects.create(inspection_id, data).await;
        self.report(result, "log defect", |d| format!("Defect '{}' logged", d.title))
    }

    pub async fn update_defect(
        &self,
        inspection_id: Uuid,
        defect_id: Uuid,
        data: &UpdateDefect,
    ) -> AppResult<Defect> {
        let result = self.services.defects.update(inspection_id, defect_id, data).await;
        self.report(result, "update defect", |d| format!("Defect '{}' is {}", d.title, d.status))
    }

    pub async fn add_photo(&self, inspection_id: Uuid, data: &AddPhoto) -> AppResult<Photo> {
        let result = self.services.evidence.add_photo(inspection_id, data).await;
        self.report(result, "add photo", |_| "Photo added".to_string())
    }

    pub async fn add_signoff(&self, inspection_id: Uuid, data: &AddSignoff) -> AppResult<Inspection> {
        let result = self.services.evidence.add_signoff(inspection_id, data).await;
        self.report(result, "sign off inspection", |i| {
            format!("Sign-off recorded; inspection is {}", i.status)
        })
    }

    // -----------------------------------------------------------------------
    // Task bridge
    // -----------------------------------------------------------------------

    pub async fn derive_task(&self, inspection_id: Uuid) -> AppResult<TaskDraft> {
        self.services.tasks.derive(inspection_id).await
    }

    pub async fn hand_off_task(&self, inspection_id: Uuid) -> AppResult<TaskDraft> {
        let result = self.services.tasks.hand_off(inspection_id).await;
        self.report(result, "create follow-up task", |d| {
            format!("Follow-up task '{}' created", d.title)
        })
    }

    fn report<T>(
        &self,
        result: AppResult<T>,
        action: &str,
        success: impl FnOnce(&T) -> String,
    ) -> AppResult<T> {
        let notification = match &result {
            Ok(value) => Notification::success(success(value)),
            Err(e) => {
                if e.kind() == ErrorKind::Internal {
                    tracing::error!("Failed to {}: {}", action, e);
                }
                Notification::failure(format!("Failed to {}: {}", action, e))
            }
        };
        self.notifications.notify(notification);
        result
    }
}
