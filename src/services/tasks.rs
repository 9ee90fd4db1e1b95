//! Task bridge: follow-up task drafts for the external task center

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use config::ConfigError;
use indexmap::IndexMap;
use serde_json::json;
use uuid::Uuid;

use super::assets::{AssetDirectory, AssetSummary};
use crate::{
    config::TasksConfig,
    error::{AppError, AppResult},
    models::{
        enums::{InspectionStatus, TaskPriority},
        inspection::Inspection,
        task::{TaskDraft, SOURCE_TYPE_PDI_INSPECTION},
    },
    repository::Repository,
};

/// Receiver of follow-up task drafts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskSink: Send + Sync {
    async fn submit(&self, draft: TaskDraft) -> AppResult<()>;
}

/// Sink that only logs drafts; used when no task center is wired in
#[derive(Debug, Clone, Default)]
pub struct LoggingTaskSink;

#[async_trait]
impl TaskSink for LoggingTaskSink {
    async fn submit(&self, draft: TaskDraft) -> AppResult<()> {
        tracing::info!(
            "Follow-up task for {} {} ({:?}, due {}): {}",
            draft.source_type,
            draft.source_id,
            draft.priority,
            draft.due_date,
            draft.title
        );
        Ok(())
    }
}

/// Derive the follow-up task for an inspection as it stands at `now`
pub fn derive_task(
    inspection: &Inspection,
    asset: Option<&AssetSummary>,
    config: &TasksConfig,
    now: DateTime<Utc>,
) -> AppResult<TaskDraft> {
    let active_defects: Vec<_> = inspection.active_defects().collect();
    let in_progress = inspection.status == InspectionStatus::InProgress;

    let priority = if !active_defects.is_empty() {
        TaskPriority::High
    } else if in_progress {
        TaskPriority::Medium
    } else {
        TaskPriority::Low
    };

    let due_days = if in_progress {
        config.due_days_in_progress
    } else {
        config.due_days_otherwise
    };
    let due_date = Duration::try_days(due_days)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| {
            AppError::Config(ConfigError::Message(format!(
                "task due offset of {} day(s) is out of range",
                due_days
            )))
        })?;

    let asset_label = asset
        .map(|a| a.label.clone())
        .unwrap_or_else(|| format!("{} {}", inspection.asset_kind, inspection.asset_id));
    let progress = inspection.progress();

    let mut description = format!(
        "{} v{} is {} ({}% complete, {} failed item(s)).",
        inspection.template_name,
        inspection.template_version,
        inspection.status,
        progress.percent,
        progress.failed
    );
    for defect in &active_defects {
        description.push_str(&format!("\n- [{}] {}", defect.severity, defect.title));
    }

    let mut custom_fields = IndexMap::new();
    custom_fields.insert("assetId".to_string(), json!(inspection.asset_id));
    custom_fields.insert("assetKind".to_string(), json!(inspection.asset_kind));
    custom_fields.insert("templateId".to_string(), json!(inspection.template_id));
    custom_fields.insert("defectCount".to_string(), json!(inspection.defects.len()));
    custom_fields.insert("openDefectCount".to_string(), json!(active_defects.len()));
    custom_fields.insert("progress".to_string(), json!(progress.percent));
    if let Some(follow_up) = active_defects
        .iter()
        .map(|d| d.severity.follow_up_priority())
        .max()
    {
        custom_fields.insert("followUp".to_string(), json!(follow_up));
    }

    Ok(TaskDraft {
        title: format!("PDI follow-up: {}", asset_label),
        description,
        priority,
        due_date,
        source_id: inspection.id,
        source_type: SOURCE_TYPE_PDI_INSPECTION.to_string(),
        custom_fields,
    })
}

#[derive(Clone)]
pub struct TasksService {
    repository: Repository,
    assets: Arc<dyn AssetDirectory>,
    sink: Arc<dyn TaskSink>,
    config: TasksConfig,
}

impl TasksService {
    pub fn new(
        repository: Repository,
        assets: Arc<dyn AssetDirectory>,
        sink: Arc<dyn TaskSink>,
        config: TasksConfig,
    ) -> Self {
        Self {
            repository,
            assets,
            sink,
            config,
        }
    }

    /// Build the follow-up draft without emitting it
    pub async fn derive(&self, inspection_id: Uuid) -> AppResult<TaskDraft> {
        let inspection = self.repository.inspections_get(inspection_id).await?;
        let asset = match self.assets.lookup(&inspection.asset_id).await {
            Ok(asset) => asset,
            Err(e) => {
                tracing::warn!("Asset lookup for {} failed: {}", inspection.asset_id, e);
                None
            }
        };
        derive_task(&inspection, asset.as_ref(), &self.config, Utc::now())
    }

    /// Derive the draft and submit it to the task sink
    pub async fn hand_off(&self, inspection_id: Uuid) -> AppResult<TaskDraft> {
        let draft = self.derive(inspection_id).await?;
        self.sink.submit(draft.clone()).await?;
        tracing::info!(
            "Handed off {:?} priority task for inspection {}",
            draft.priority,
            inspection_id
        );
        Ok(draft)
    }
}
