use pdi_engine::{
    models::{
        AddPhoto, AddSignoff, CreateDefect, DefectSeverity, DefectStatus, InspectionStatus,
        ItemStatus, SignoffOutcome, SignoffRole, UpdateDefect,
    },
    AppError,
};
use uuid::Uuid;

use crate::common::{self, harness};

pub fn signoff_by(role: SignoffRole, outcome: SignoffOutcome) -> AddSignoff {
    AddSignoff {
        user_id: format!("{}-1", role),
        role,
        outcome,
        signature: None,
        comment: None,
    }
}

fn defect(title: &str, severity: DefectSeverity) -> CreateDefect {
    CreateDefect {
        title: title.to_string(),
        description: String::new(),
        severity,
        assigned_to: None,
        item_id: None,
    }
}

fn photo(url: &str) -> AddPhoto {
    AddPhoto {
        url: url.to_string(),
        caption: None,
        item_id: None,
        defect_id: None,
    }
}

#[tokio::test]
async fn test_approval_requires_approver_role() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;
    h.engine.complete_inspection(inspection.id, None).await.unwrap();

    let err = h
        .engine
        .add_signoff(inspection.id, &signoff_by(SignoffRole::Inspector, SignoffOutcome::Approve))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(stored.status, InspectionStatus::Completed);
    assert!(stored.signoffs.is_empty());
}

#[tokio::test]
async fn test_signoff_on_missing_inspection() {
    let h = harness();
    let err = h
        .engine
        .add_signoff(Uuid::new_v4(), &signoff_by(SignoffRole::Customer, SignoffOutcome::Approve))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InspectionNotFound(_)));
}

#[tokio::test]
async fn test_review_outcomes_require_completed_inspection() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    for outcome in [SignoffOutcome::Approve, SignoffOutcome::Reject] {
        let err = h
            .engine
            .add_signoff(inspection.id, &signoff_by(SignoffRole::Supervisor, outcome))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    let stored = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(stored.status, InspectionStatus::InProgress);
    assert!(stored.signoffs.is_empty());
}

#[tokio::test]
async fn test_rejection_is_recorded() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;
    common::complete_with(
        &h.engine,
        &inspection,
        &[ItemStatus::Passed, ItemStatus::Failed, ItemStatus::Na],
    )
    .await;

    let rejected = h
        .engine
        .add_signoff(
            inspection.id,
            &AddSignoff {
                comment: Some("  Hitch needs rework ".to_string()),
                ..signoff_by(SignoffRole::Manager, SignoffOutcome::Reject)
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, InspectionStatus::Rejected);
    assert_eq!(rejected.signoffs[0].comment.as_deref(), Some("Hitch needs rework"));

    // approved and rejected are final for review outcomes
    let err = h
        .engine
        .add_signoff(inspection.id, &signoff_by(SignoffRole::Supervisor, SignoffOutcome::Approve))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_acknowledgements_accumulate_in_any_status() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;
    let ack = AddSignoff {
        user_id: "tech-12".to_string(),
        signature: Some("sig/tech-12.png".to_string()),
        ..signoff_by(SignoffRole::Technician, SignoffOutcome::Acknowledge)
    };

    let first = h.engine.add_signoff(inspection.id, &ack).await.unwrap();
    assert_eq!(first.status, InspectionStatus::InProgress);
    let second = h.engine.add_signoff(inspection.id, &ack).await.unwrap();
    assert_eq!(second.signoffs.len(), 2);
    assert_eq!(second.signoffs[0].user_id, second.signoffs[1].user_id);

    h.engine.complete_inspection(inspection.id, None).await.unwrap();
    h.engine
        .add_signoff(inspection.id, &signoff_by(SignoffRole::Supervisor, SignoffOutcome::Approve))
        .await
        .unwrap();
    let after = h
        .engine
        .add_signoff(inspection.id, &signoff_by(SignoffRole::Customer, SignoffOutcome::Acknowledge))
        .await
        .unwrap();
    assert_eq!(after.status, InspectionStatus::Approved);
    assert_eq!(after.signoffs.len(), 4);
    assert!(after.signoffs.windows(2).all(|w| w[0].signed_at <= w[1].signed_at));
}

#[tokio::test]
async fn test_photos_link_to_existing_items_and_defects() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    let blank = h.engine.add_photo(inspection.id, &photo("  ")).await.unwrap_err();
    assert!(matches!(blank, AppError::Validation(_)));

    let unknown_defect = h
        .engine
        .add_photo(
            inspection.id,
            &AddPhoto {
                defect_id: Some(Uuid::new_v4()),
                ..photo("https://cdn.example.com/p/1.jpg")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(unknown_defect, AppError::DefectNotFound(_)));

    let logged = h
        .engine
        .create_defect(inspection.id, &defect("Cracked roof vent", DefectSeverity::Medium))
        .await
        .unwrap();
    let attached = h
        .engine
        .add_photo(
            inspection.id,
            &AddPhoto {
                caption: Some("Vent close-up".to_string()),
                item_id: Some(inspection.items[0].id),
                defect_id: Some(logged.id),
                ..photo("https://cdn.example.com/p/2.jpg")
            },
        )
        .await
        .unwrap();
    assert_eq!(attached.defect_id, Some(logged.id));

    let stored = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(stored.photos.len(), 1);
    assert_eq!(stored.photos[0], attached);
}

#[tokio::test]
async fn test_defects_leave_items_untouched() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    let logged = h
        .engine
        .create_defect(
            inspection.id,
            &CreateDefect {
                item_id: Some(inspection.items[1].id),
                assigned_to: Some("service-bay-2".to_string()),
                ..defect("Safety chain hook bent", DefectSeverity::High)
            },
        )
        .await
        .unwrap();
    assert_eq!(logged.status, DefectStatus::Open);
    assert_eq!(logged.assigned_to.as_deref(), Some("service-bay-2"));

    let stored = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(stored.items, inspection.items);
    assert_eq!(stored.defects, vec![logged]);
}

#[tokio::test]
async fn test_defect_validation() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    let blank = h
        .engine
        .create_defect(inspection.id, &defect(" ", DefectSeverity::Low))
        .await
        .unwrap_err();
    assert!(matches!(blank, AppError::Validation(_)));

    let unknown_item = h
        .engine
        .create_defect(
            inspection.id,
            &CreateDefect {
                item_id: Some(Uuid::new_v4()),
                ..defect("Loose trim", DefectSeverity::Low)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(unknown_item, AppError::ItemNotFound(_)));

    let unknown_inspection = h
        .engine
        .create_defect(Uuid::new_v4(), &defect("Loose trim", DefectSeverity::Low))
        .await
        .unwrap_err();
    assert!(matches!(unknown_inspection, AppError::InspectionNotFound(_)));

    assert!(h
        .engine
        .get_inspection_by_id(inspection.id)
        .await
        .unwrap()
        .defects
        .is_empty());
}

#[tokio::test]
async fn test_defects_after_approval() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;
    h.engine.complete_inspection(inspection.id, None).await.unwrap();
    h.engine
        .add_signoff(inspection.id, &signoff_by(SignoffRole::Supervisor, SignoffOutcome::Approve))
        .await
        .unwrap();

    let late = h
        .engine
        .create_defect(inspection.id, &defect("Water stain found at delivery", DefectSeverity::Medium))
        .await
        .unwrap();
    let stored = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(stored.status, InspectionStatus::Approved);
    assert_eq!(stored.defects[0].id, late.id);
}

#[tokio::test]
async fn test_defect_lifecycle() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;
    let logged = h
        .engine
        .create_defect(inspection.id, &defect("Door seal torn", DefectSeverity::Medium))
        .await
        .unwrap();

    let resolved = h
        .engine
        .update_defect(
            inspection.id,
            logged.id,
            &UpdateDefect {
                status: Some(DefectStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(resolved.resolved_at.is_some());

    let closed = h
        .engine
        .update_defect(
            inspection.id,
            logged.id,
            &UpdateDefect {
                status: Some(DefectStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(closed.status, DefectStatus::Closed);

    let err = h
        .engine
        .update_defect(
            inspection.id,
            logged.id,
            &UpdateDefect {
                status: Some(DefectStatus::Open),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    let missing = h
        .engine
        .update_defect(inspection.id, Uuid::new_v4(), &UpdateDefect::default())
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::DefectNotFound(_)));
}
