//! Template domain methods on Repository

use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::template::{Template, TemplateQuery},
};

impl Repository {
    /// Get template by ID
    pub async fn templates_get(&self, id: Uuid) -> AppResult<Template> {
        self.templates
            .get(id)
            .await?
            .ok_or(AppError::TemplateNotFound(id))
    }

    /// List templates matching the query, in creation order
    pub async fn templates_list(&self, query: &TemplateQuery) -> AppResult<Vec<Template>> {
        let needle = query.name.as_deref().map(str::to_lowercase);
        let templates = self
            .templates
            .list()
            .await?
            .into_iter()
            .filter(|t| query.active.map_or(true, |active| t.is_active == active))
            .filter(|t| {
                needle
                    .as_deref()
                    .map_or(true, |n| t.name.to_lowercase().contains(n))
            })
            .collect();
        Ok(templates)
    }

    /// Highest version stored for a lineage, 0 when none remain
    pub async fn templates_latest_version(&self, lineage_id: Uuid) -> AppResult<u32> {
        let latest = self
            .templates
            .list()
            .await?
            .iter()
            .filter(|t| t.lineage_id == lineage_id)
            .map(|t| t.version)
            .max()
            .unwrap_or(0);
        Ok(latest)
    }

    /// Store a template. Callers hold the template write gate.
    pub async fn templates_put(&self, template: Template) -> AppResult<()> {
        self.templates.put(template).await
    }

    /// Delete a template. Callers hold the template write gate.
    pub async fn templates_delete(&self, id: Uuid) -> AppResult<()> {
        if !self.templates.delete(id).await? {
            return Err(AppError::TemplateNotFound(id));
        }
        Ok(())
    }
}
