use chrono::{Duration, Utc};
use pdi_engine::{
    models::{
        CreateDefect, CreateInspection, DefectSeverity, DefectStatus, SignoffOutcome,
        SignoffRole, TaskPriority, UpdateDefect, SOURCE_TYPE_PDI_INSPECTION,
    },
    AppError,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::{self, harness},
    evidence_tests::signoff_by,
};

fn defect(title: &str, severity: DefectSeverity) -> CreateDefect {
    CreateDefect {
        title: title.to_string(),
        description: String::new(),
        severity,
        assigned_to: None,
        item_id: None,
    }
}

#[tokio::test]
async fn test_priority_follows_defects_and_status() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    let open = h.engine.derive_task(inspection.id).await.unwrap();
    assert_eq!(open.priority, TaskPriority::Medium);

    let logged = h
        .engine
        .create_defect(inspection.id, &defect("Awning arm loose", DefectSeverity::Critical))
        .await
        .unwrap();
    let with_defect = h.engine.derive_task(inspection.id).await.unwrap();
    assert_eq!(with_defect.priority, TaskPriority::High);
    assert_eq!(with_defect.custom_fields["followUp"], json!("urgent"));

    h.engine
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
    h.engine.complete_inspection(inspection.id, None).await.unwrap();
    h.engine
        .add_signoff(inspection.id, &signoff_by(SignoffRole::Supervisor, SignoffOutcome::Approve))
        .await
        .unwrap();

    let settled = h.engine.derive_task(inspection.id).await.unwrap();
    assert_eq!(settled.priority, TaskPriority::Low);
    assert_eq!(settled.custom_fields["defectCount"], json!(1));
    assert_eq!(settled.custom_fields["openDefectCount"], json!(0));
    assert!(!settled.custom_fields.contains_key("followUp"));
}

#[tokio::test]
async fn test_hand_off_submits_draft() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    let before = Utc::now();
    let draft = h.engine.hand_off_task(inspection.id).await.unwrap();

    assert_eq!(draft.title, "PDI follow-up: 2025 Keystone Cougar 29BHS");
    assert_eq!(draft.source_id, inspection.id);
    assert_eq!(draft.source_type, SOURCE_TYPE_PDI_INSPECTION);
    assert_eq!(draft.custom_fields["assetId"], json!("VIN-4471"));
    assert_eq!(draft.custom_fields["templateId"], json!(template.id));
    assert_eq!(draft.custom_fields["progress"], json!(0));

    let due = draft.due_date - before;
    assert!(due >= Duration::days(1) && due < Duration::days(1) + Duration::minutes(1));

    let recorded = h.tasks.drafts.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], draft);
}

#[tokio::test]
async fn test_unknown_asset_falls_back_to_id() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = h
        .engine
        .create_inspection(&CreateInspection {
            template_id: template.id,
            asset_id: "LOT-17".to_string(),
            asset_kind: pdi_engine::models::AssetKind::Home,
            inspector_id: "tech-4".to_string(),
        })
        .await
        .unwrap();

    let draft = h.engine.derive_task(inspection.id).await.unwrap();
    assert_eq!(draft.title, "PDI follow-up: home LOT-17");
    assert_eq!(draft.custom_fields["assetKind"], json!("home"));
    // deriving alone never reaches the sink
    assert!(h.tasks.drafts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_inspection_is_not_handed_off() {
    let h = harness();
    let err = h.engine.hand_off_task(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::InspectionNotFound(_)));
    assert!(h.tasks.drafts.lock().unwrap().is_empty());
    assert_eq!(h.notifier.failures().len(), 1);
}
