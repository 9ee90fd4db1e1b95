//! Template store service

use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::notifications::EventBus;
use crate::{
    error::{AppError, AppResult},
    models::{
        event::EngineEvent,
        template::{
            CreateTemplate, Section, SectionInput, Template, TemplateItem, TemplateQuery,
            UpdateTemplate,
        },
    },
    repository::Repository,
};

const COPY_SUFFIX: &str = " (Copy)";

#[derive(Clone)]
pub struct TemplatesService {
    repository: Repository,
    events: EventBus,
}

impl TemplatesService {
    pub fn new(repository: Repository, events: EventBus) -> Self {
        Self { repository, events }
    }

    /// List templates
    pub async fn list(&self, query: &TemplateQuery) -> AppResult<Vec<Template>> {
        self.repository.templates_list(query).await
    }

    /// Get template by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Template> {
        self.repository.templates_get(id).await
    }

    /// Create a template at version 1
    pub async fn create(&self, data: &CreateTemplate) -> AppResult<Template> {
        data.validate()?;
        let now = Utc::now();
        let id = Uuid::new_v4();
        let template = Template {
            id,
            lineage_id: id,
            name: normalize_name(&data.name)?,
            description: non_blank(data.description.as_deref()),
            version: 1,
            is_active: data.is_active,
            sections: build_sections(&data.sections)?,
            created_at: now,
            updated_at: now,
        };

        let _guard = self.repository.lock_templates().await;
        self.repository.templates_put(template.clone()).await?;
        tracing::info!(
            "Created template {} '{}' with {} item(s)",
            template.id,
            template.name,
            template.item_count()
        );
        self.publish(&template);
        Ok(template)
    }

    /// Update a template.
    ///
    /// Content edits take the next version of the template's lineage. When
    /// inspections were created from the template they are written to a new
    /// record and the referenced one keeps its content. An `is_active` change
    /// always applies to the targeted template, forked or not.
    pub async fn update(&self, id: Uuid, data: &UpdateTemplate) -> AppResult<Template> {
        data.validate()?;
        let _guard = self.repository.lock_templates().await;
        let current = self.repository.templates_get(id).await?;

        let mut next = current.clone();
        if let Some(ref name) = data.name {
            next.name = normalize_name(name)?;
        }
        if let Some(ref description) = data.description {
            next.description = non_blank(Some(description.as_str()));
        }
        if let Some(ref sections) = data.sections {
            next.sections = build_sections(sections)?;
        }
        if let Some(active) = data.is_active {
            next.is_active = active;
        }

        let now = Utc::now();
        let mut forked = false;
        if data.changes_content() {
            next.version = self
                .repository
                .templates_latest_version(current.lineage_id)
                .await?
                + 1;
            if self.repository.inspections_reference_template(id).await? {
                forked = true;
                next.id = Uuid::new_v4();
                next.created_at = now;
                tracing::info!(
                    "Template {} is referenced by inspections; saved version {} as {}",
                    id,
                    next.version,
                    next.id
                );
            }
        }
        next.updated_at = now;

        if forked {
            if let Some(active) = data.is_active.filter(|a| *a != current.is_active) {
                let original = Template {
                    is_active: active,
                    updated_at: now,
                    ..current
                };
                self.repository.templates_put(original.clone()).await?;
                tracing::info!("Template {} is now {}", id, activity(active));
                self.publish(&original);
            }
        }
        self.repository.templates_put(next.clone()).await?;
        tracing::info!("Updated template {} (version {})", next.id, next.version);
        self.publish(&next);
        Ok(next)
    }

    /// Delete a template; inspections keep their own copy of its items
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.repository.lock_templates().await;
        self.repository.templates_delete(id).await?;
        tracing::info!("Deleted template {}", id);
        self.events.publish(EngineEvent::TemplateDeleted { id });
        Ok(())
    }

    /// Copy a template under a new id with " (Copy)" appended to its name
    pub async fn duplicate(&self, id: Uuid) -> AppResult<Template> {
        let _guard = self.repository.lock_templates().await;
        let source = self.repository.templates_get(id).await?;
        let now = Utc::now();
        let copy_id = Uuid::new_v4();
        let copy = Template {
            id: copy_id,
            lineage_id: copy_id,
            name: format!("{}{}", source.name, COPY_SUFFIX),
            version: 1,
            created_at: now,
            updated_at: now,
            ..source
        };

        self.repository.templates_put(copy.clone()).await?;
        tracing::info!("Duplicated template {} as {}", id, copy.id);
        self.publish(&copy);
        Ok(copy)
    }

    /// Load a JSON array of template create requests
    pub async fn import_file(&self, path: impl AsRef<Path>) -> AppResult<Vec<Template>> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let requests: Vec<CreateTemplate> = serde_json::from_str(&raw)?;
        tracing::debug!("Importing {} template(s) from {}", requests.len(), path.display());

        let mut created = Vec::with_capacity(requests.len());
        for request in &requests {
            created.push(self.create(request).await?);
        }
        Ok(created)
    }

    fn publish(&self, template: &Template) {
        self.events.publish(EngineEvent::template_saved(template));
    }
}

fn normalize_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Template name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}

fn activity(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Turn section inputs into sections, generating missing ids.
///
/// Section ids and item ids must each be unique across the whole template.
fn build_sections(inputs: &[SectionInput]) -> AppResult<Vec<Section>> {
    let mut section_ids = HashSet::new();
    let mut item_ids = HashSet::new();
    let mut sections = Vec::with_capacity(inputs.len());

    for input in inputs {
        input.validate()?;
        let section_name = input.name.trim();
        if section_name.is_empty() {
            return Err(AppError::Validation("Section name cannot be empty".to_string()));
        }
        let section_id = input.id.unwrap_or_else(Uuid::new_v4);
        if !section_ids.insert(section_id) {
            return Err(AppError::Validation(format!(
                "Duplicate section id {} in template",
                section_id
            )));
        }

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            item.validate()?;
            let item_name = item.name.trim();
            if item_name.is_empty() {
                return Err(AppError::Validation("Item name cannot be empty".to_string()));
            }
            let item_id = item.id.unwrap_or_else(Uuid::new_v4);
            if !item_ids.insert(item_id) {
                return Err(AppError::Validation(format!(
                    "Duplicate item id {} in template",
                    item_id
                )));
            }
            items.push(TemplateItem {
                id: item_id,
                name: item_name.to_string(),
                description: non_blank(item.description.as_deref()),
                is_required: item.is_required,
                response_type: item.response_type,
            });
        }

        sections.push(Section {
            id: section_id,
            name: section_name.to_string(),
            description: non_blank(input.description.as_deref()),
            items,
        });
    }

    Ok(sections)
}
