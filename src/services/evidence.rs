//! Photo and sign-off ledger

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::{notifications::EventBus, workflow};
use crate::{
    config::InspectionsConfig,
    error::{AppError, AppResult},
    models::{
        enums::{SignoffOutcome, SignoffRole},
        event::EngineEvent,
        evidence::{AddPhoto, AddSignoff, Photo, Signoff},
        inspection::Inspection,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EvidenceService {
    repository: Repository,
    events: EventBus,
    config: InspectionsConfig,
}

impl EvidenceService {
    pub fn new(repository: Repository, events: EventBus, config: InspectionsConfig) -> Self {
        Self {
            repository,
            events,
            config,
        }
    }

    /// Append a photo; the url is stored as given
    pub async fn add_photo(&self, inspection_id: Uuid, data: &AddPhoto) -> AppResult<Photo> {
        data.validate()?;
        let url = data.url.trim();
        if url.is_empty() {
            return Err(AppError::Validation("Photo url cannot be empty".to_string()));
        }

        let (inspection, photo) = self
            .repository
            .inspections_modify(inspection_id, |inspection| {
                if let Some(item_id) = data.item_id {
                    inspection.item(item_id).ok_or(AppError::ItemNotFound(item_id))?;
                }
                if let Some(defect_id) = data.defect_id {
                    inspection
                        .defect(defect_id)
                        .ok_or(AppError::DefectNotFound(defect_id))?;
                }
                let photo = Photo {
                    id: Uuid::new_v4(),
                    url: url.to_string(),
                    caption: data
                        .caption
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string),
                    item_id: data.item_id,
                    defect_id: data.defect_id,
                    uploaded_at: Utc::now(),
                };
                inspection.photos.push(photo.clone());
                Ok(photo)
            })
            .await?;

        tracing::debug!("Attached photo {} to inspection {}", photo.id, inspection_id);
        self.events.publish(EngineEvent::inspection_saved(&inspection));
        Ok(photo)
    }

    /// Append a sign-off. Approve and reject outcomes move a completed
    /// inspection to its terminal review state.
    pub async fn add_signoff(&self, inspection_id: Uuid, data: &AddSignoff) -> AppResult<Inspection> {
        data.validate()?;
        let user_id = data.user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::Validation("User id cannot be empty".to_string()));
        }
        let may_approve = self.may_approve(data.role);

        let (inspection, previous) = self
            .repository
            .inspections_modify(inspection_id, |inspection| {
                if data.outcome == SignoffOutcome::Approve && !may_approve {
                    return Err(AppError::Validation(format!(
                        "Role {} is not permitted to approve inspections",
                        data.role
                    )));
                }
                let previous = inspection.status;
                inspection.status = workflow::status_after_signoff(previous, data.outcome)?;
                inspection.signoffs.push(Signoff {
                    id: Uuid::new_v4(),
                    user_id: user_id.to_string(),
                    role: data.role,
                    outcome: data.outcome,
                    signature: data.signature.clone(),
                    comment: data
                        .comment
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string),
                    signed_at: Utc::now(),
                });
                Ok(previous)
            })
            .await
            .inspect_err(|e| tracing::warn!("Sign-off on inspection {} refused: {}", inspection_id, e))?;

        if previous != inspection.status {
            tracing::info!(
                "Inspection {} moved from {} to {} by {} sign-off of {}",
                inspection_id,
                previous,
                inspection.status,
                data.role,
                user_id
            );
        } else {
            tracing::debug!("Recorded {} sign-off on inspection {}", data.role, inspection_id);
        }
        self.events.publish(EngineEvent::inspection_saved(&inspection));
        Ok(inspection)
    }

    fn may_approve(&self, role: SignoffRole) -> bool {
        self.config.approver_roles.is_empty() || self.config.approver_roles.contains(&role)
    }
}
