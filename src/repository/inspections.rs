//! Inspection domain methods on Repository

use chrono::Utc;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::inspection::{Inspection, InspectionQuery},
};

impl Repository {
    /// Get inspection by ID
    pub async fn inspections_get(&self, id: Uuid) -> AppResult<Inspection> {
        self.inspections
            .get(id)
            .await?
            .ok_or(AppError::InspectionNotFound(id))
    }

    /// List inspections matching the query
    pub async fn inspections_list(&self, query: &InspectionQuery) -> AppResult<Vec<Inspection>> {
        let inspections = self
            .inspections
            .list()
            .await?
            .into_iter()
            .filter(|i| query.matches(i))
            .collect();
        Ok(inspections)
    }

    /// Store a freshly created inspection
    pub async fn inspections_insert(&self, inspection: Inspection) -> AppResult<Inspection> {
        let _guard = self.inspection_writes.lock().await;
        self.inspections.put(inspection.clone()).await?;
        Ok(inspection)
    }

    /// Apply `change` to a copy of the stored inspection and persist it.
    ///
    /// The stored record is replaced only when `change` succeeds, so a failed
    /// change leaves it untouched.
    pub async fn inspections_modify<R, F>(&self, id: Uuid, change: F) -> AppResult<(Inspection, R)>
    where
        F: FnOnce(&mut Inspection) -> AppResult<R> + Send,
        R: Send,
    {
        let _guard = self.inspection_writes.lock().await;
        let mut inspection = self.inspections_get(id).await?;
        let output = change(&mut inspection)?;
        inspection.updated_at = Utc::now();
        self.inspections.put(inspection.clone()).await?;
        Ok((inspection, output))
    }

    /// Whether any inspection was instantiated from this template
    pub async fn inspections_reference_template(&self, template_id: Uuid) -> AppResult<bool> {
        let referenced = self
            .inspections
            .list()
            .await?
            .iter()
            .any(|i| i.template_id == template_id);
        Ok(referenced)
    }
}
