use pdi_engine::{
    models::{ItemStatus, SectionInput, TemplateQuery, UpdateTemplate},
    AppError,
};
use uuid::Uuid;

use crate::common::{self, harness, item, set_status};

#[tokio::test]
async fn test_create_and_list_templates() {
    let h = harness();
    let template = common::create_template(&h.engine).await;

    assert_eq!(template.version, 1);
    assert!(template.is_active);
    assert_eq!(template.item_count(), 3);
    assert_eq!(template.required_item_count(), 2);

    let fetched = h.engine.get_template(template.id).await.unwrap();
    assert_eq!(fetched, template);

    let listed = h
        .engine
        .list_templates(&TemplateQuery {
            active: Some(true),
            name: Some("towable".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let none = h
        .engine
        .list_templates(&TemplateQuery {
            active: Some(false),
            name: None,
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let h = harness();
    let mut request = common::towable_template();
    request.name = "   ".to_string();

    let err = h.engine.create_template(&request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(h.notifier.failures().len(), 1);
    assert!(h
        .engine
        .list_templates(&TemplateQuery::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_create_rejects_duplicate_item_ids() {
    let h = harness();
    let shared = Uuid::new_v4();
    let mut request = common::towable_template();
    request.sections[0].items[0].id = Some(shared);
    request.sections.push(SectionInput {
        id: None,
        name: "Interior".to_string(),
        description: None,
        items: vec![pdi_engine::models::TemplateItemInput {
            id: Some(shared),
            ..item("Smoke detector", true)
        }],
    });

    let err = h.engine.create_template(&request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_isolation() {
    let h = harness();
    let original = common::create_template(&h.engine).await;

    let copy = h.engine.duplicate_template(original.id).await.unwrap();
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "Towable PDI (Copy)");
    assert_eq!(copy.sections, original.sections);
    assert_eq!(copy.description, original.description);

    h.engine
        .update_template(
            copy.id,
            &UpdateTemplate {
                name: Some("Fifth Wheel PDI".to_string()),
                sections: Some(vec![SectionInput {
                    id: None,
                    name: "Slides".to_string(),
                    description: None,
                    items: vec![item("Slide seals", true)],
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let untouched = h.engine.get_template(original.id).await.unwrap();
    assert_eq!(untouched, original);
}

#[tokio::test]
async fn test_update_unreferenced_template_in_place() {
    let h = harness();
    let template = common::create_template(&h.engine).await;

    let updated = h
        .engine
        .update_template(
            template.id,
            &UpdateTemplate {
                description: Some("Revised".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, template.id);
    assert_eq!(updated.version, 2);
    assert_eq!(updated.description.as_deref(), Some("Revised"));
    assert_eq!(h.engine.list_templates(&TemplateQuery::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_referenced_template_forks_new_version() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    let revised = h
        .engine
        .update_template(
            template.id,
            &UpdateTemplate {
                sections: Some(vec![SectionInput {
                    id: None,
                    name: "Exterior".to_string(),
                    description: None,
                    items: vec![item("Roof seams", true)],
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(revised.id, template.id);
    assert_eq!(revised.version, 2);
    assert_eq!(revised.item_count(), 1);

    // The referenced template and the open inspection keep their shape
    assert_eq!(h.engine.get_template(template.id).await.unwrap(), template);
    let open = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(open.items.len(), 3);
    assert_eq!(open.template_version, 1);

    h.engine
        .update_inspection_item(open.id, open.items[2].id, &set_status(ItemStatus::Passed))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_toggling_active_never_forks() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    common::start_inspection(&h.engine, &template).await;

    let deactivated = h
        .engine
        .update_template(
            template.id,
            &UpdateTemplate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(deactivated.id, template.id);
    assert_eq!(deactivated.version, template.version);
    assert!(!deactivated.is_active);
}

#[tokio::test]
async fn test_delete_template_keeps_inspection_snapshot() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    let inspection = common::start_inspection(&h.engine, &template).await;

    h.engine.delete_template(template.id).await.unwrap();
    assert!(matches!(
        h.engine.get_template(template.id).await,
        Err(AppError::TemplateNotFound(_))
    ));
    assert!(matches!(
        h.engine.delete_template(template.id).await,
        Err(AppError::TemplateNotFound(_))
    ));

    let snapshot = h.engine.get_inspection_by_id(inspection.id).await.unwrap();
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.template_name, "Towable PDI");
}

#[tokio::test]
async fn test_import_seed_file() {
    let h = harness();
    let imported = h
        .engine
        .services
        .templates
        .import_file("config/seed_templates.json")
        .await
        .unwrap();

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].name, "Travel Trailer PDI");
    assert_eq!(imported[0].item_count(), 6);

    let missing = h
        .engine
        .services
        .templates
        .import_file("config/does_not_exist.json")
        .await;
    assert!(matches!(missing, Err(AppError::Io(_))));
}

#[tokio::test]
async fn test_deactivating_while_editing_a_referenced_template() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    common::start_inspection(&h.engine, &template).await;

    let revised = h
        .engine
        .update_template(
            template.id,
            &UpdateTemplate {
                name: Some("Towable PDI (retired)".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_ne!(revised.id, template.id);
    assert!(!revised.is_active);

    let original = h.engine.get_template(template.id).await.unwrap();
    assert!(!original.is_active);
    assert_eq!(original.name, template.name);
    assert_eq!(original.version, template.version);
    assert_eq!(original.sections, template.sections);

    let active = h
        .engine
        .list_templates(&TemplateQuery {
            active: Some(true),
            name: None,
        })
        .await
        .unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_repeated_edits_of_a_referenced_template_take_new_versions() {
    let h = harness();
    let template = common::create_template(&h.engine).await;
    common::start_inspection(&h.engine, &template).await;

    let mut versions = Vec::new();
    for description in ["First revision", "Second revision"] {
        let revised = h
            .engine
            .update_template(
                template.id,
                &UpdateTemplate {
                    description: Some(description.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(revised.lineage_id, template.lineage_id);
        versions.push((revised.id, revised.version));
    }

    assert_ne!(versions[0].0, versions[1].0);
    assert_eq!(versions[0].1, 2);
    assert_eq!(versions[1].1, 3);

    // an in-place edit of the first fork continues the same sequence
    let fork = h
        .engine
        .update_template(
            versions[0].0,
            &UpdateTemplate {
                description: Some("Third revision".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(fork.id, versions[0].0);
    assert_eq!(fork.version, 4);
}

#[tokio::test]
async fn test_duplicate_starts_a_new_lineage() {
    let h = harness();
    let original = common::create_template(&h.engine).await;
    assert_eq!(original.lineage_id, original.id);

    let copy = h.engine.duplicate_template(original.id).await.unwrap();
    assert_eq!(copy.lineage_id, copy.id);
    assert_eq!(copy.version, 1);
}
