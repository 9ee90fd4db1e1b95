//! Business logic services

pub mod assets;
pub mod defects;
pub mod evidence;
pub mod inspections;
pub mod notifications;
pub mod tasks;
pub mod templates;
pub mod workflow;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// External collaborators the engine talks to
#[derive(Clone)]
pub struct Integrations {
    pub assets: Arc<dyn assets::AssetDirectory>,
    pub tasks: Arc<dyn tasks::TaskSink>,
    pub notifications: Arc<dyn notifications::NotificationSink>,
}

impl Default for Integrations {
    fn default() -> Self {
        Self {
            assets: Arc::new(assets::StaticAssetDirectory::default()),
            tasks: Arc::new(tasks::LoggingTaskSink),
            notifications: Arc::new(notifications::TracingNotifier),
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub templates: templates::TemplatesService,
    pub inspections: inspections::InspectionsService,
    pub defects: defects::DefectsService,
    pub evidence: evidence::EvidenceService,
    pub tasks: tasks::TasksService,
    pub events: notifications::EventBus,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, config: &AppConfig, integrations: &Integrations) -> Self {
        let events = notifications::EventBus::new(config.events.channel_capacity);
        Self {
            templates: templates::TemplatesService::new(repository.clone(), events.clone()),
            inspections: inspections::InspectionsService::new(
                repository.clone(),
                events.clone(),
                config.inspections.clone(),
            ),
            defects: defects::DefectsService::new(repository.clone(), events.clone()),
            evidence: evidence::EvidenceService::new(
                repository.clone(),
                events.clone(),
                config.inspections.clone(),
            ),
            tasks: tasks::TasksService::new(
                repository,
                integrations.assets.clone(),
                integrations.tasks.clone(),
                config.tasks.clone(),
            ),
            events,
        }
    }
}
