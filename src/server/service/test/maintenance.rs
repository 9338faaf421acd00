use super::*;
use crate::{
    model::maintenance::{ComplaintStatus, Priority, WorkOrderStatus},
    server::{
        model::work_order::CreateWorkOrderParams,
        service::{complaint::ComplaintService, work_order::WorkOrderService},
    },
};

/// Tests resolving a complaint requires a resolution and stamps the time.
///
/// Expected: BadRequest without resolution, then resolved with resolved_at set
#[tokio::test]
async fn resolve_complaint_requires_resolution() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_maintenance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let complaint = factory::complaint::create_complaint(db, org.id, tenant.id, "open").await?;
    let service = ComplaintService::new(db);
    let now = at(2026, 10, 6, 14, 0);

    let missing = service
        .update_status(org.id, complaint.id, ComplaintStatus::Resolved, Some("  ".to_string()), now)
        .await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let resolved = service
        .update_status(
            org.id,
            complaint.id,
            ComplaintStatus::Resolved,
            Some("Replaced the seal".to_string()),
            now,
        )
        .await?;
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert_eq!(resolved.resolution.as_deref(), Some("Replaced the seal"));
    assert_eq!(resolved.resolved_at, Some(now));

    Ok(())
}

/// Tests closed complaints can't be reopened.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn closed_complaint_is_final() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_maintenance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let complaint = factory::complaint::create_complaint(db, org.id, tenant.id, "closed").await?;

    let result = ComplaintService::new(db)
        .update_status(
            org.id,
            complaint.id,
            ComplaintStatus::InProgress,
            None,
            at(2026, 10, 6, 14, 0),
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests converting a complaint copies it into a work order and starts the complaint.
///
/// Expected: open work order linked to the complaint, complaint in progress
#[tokio::test]
async fn convert_to_work_order_links_complaint() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_maintenance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let complaint = factory::complaint::create_complaint(db, org.id, tenant.id, "open").await?;
    let service = ComplaintService::new(db);

    let work_order = service
        .convert_to_work_order(org.id, complaint.id, building.id, Some(80_000), None)
        .await?;

    assert_eq!(work_order.status, WorkOrderStatus::Open);
    assert_eq!(work_order.complaint_id, Some(complaint.id));
    assert_eq!(work_order.title, complaint.title);
    assert_eq!(work_order.priority, Priority::Medium);
    assert_eq!(work_order.estimated_cost, Some(80_000));

    let complaint = service.get(org.id, complaint.id).await?;
    assert_eq!(complaint.status, ComplaintStatus::InProgress);

    Ok(())
}

/// Tests a work order's unit must belong to its building.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn create_work_order_checks_unit_building() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_maintenance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let (_, other_unit) = factory::helpers::create_building_with_unit(db, org.id).await?;

    let result = WorkOrderService::new(db)
        .create(CreateWorkOrderParams {
            organization_id: org.id,
            building_id: building.id,
            unit_id: Some(other_unit.id),
            complaint_id: None,
            title: "Fix lift".to_string(),
            description: "Lift stuck on floor 3".to_string(),
            priority: Priority::High,
            estimated_cost: None,
            due_date: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests work orders go through assignment and completing one resolves its complaint.
///
/// Expected: assigned to the technician, completed with actual cost, complaint resolved
#[tokio::test]
async fn completing_work_order_resolves_complaint() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_maintenance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let technician = factory::user::UserFactory::new(db, Some(org.id))
        .role("maintenance")
        .build()
        .await?;
    let complaint =
        factory::complaint::create_complaint(db, org.id, tenant.id, "in_progress").await?;
    let work_order =
        factory::work_order::create_work_order(db, org.id, building.id, Some(complaint.id), "open")
            .await?;
    let service = WorkOrderService::new(db);
    let now = at(2026, 10, 7, 16, 0);

    let assigned = service.assign(org.id, work_order.id, technician.id).await?;
    assert_eq!(assigned.status, WorkOrderStatus::Assigned);
    assert_eq!(assigned.assigned_to, Some(technician.id));

    let skipped = service
        .update_status(org.id, work_order.id, WorkOrderStatus::Completed, None, now)
        .await;
    assert!(matches!(skipped, Err(AppError::Conflict(_))));

    service
        .update_status(org.id, work_order.id, WorkOrderStatus::InProgress, None, now)
        .await?;
    let completed = service
        .update_status(
            org.id,
            work_order.id,
            WorkOrderStatus::Completed,
            Some(95_000),
            now,
        )
        .await?;
    assert_eq!(completed.status, WorkOrderStatus::Completed);
    assert_eq!(completed.actual_cost, Some(95_000));
    assert_eq!(completed.completed_at, Some(now));

    let complaint = ComplaintService::new(db).get(org.id, complaint.id).await?;
    assert_eq!(complaint.status, ComplaintStatus::Resolved);
    assert_eq!(
        complaint.resolution,
        Some(format!("Resolved by work order {}", work_order.id))
    );

    Ok(())
}

/// Tests assignment goes through its own operation and costs can't be negative.
///
/// Expected: BadRequest for both
#[tokio::test]
async fn update_status_rejects_assignment_and_negative_cost() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_maintenance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let work_order =
        factory::work_order::create_work_order(db, org.id, building.id, None, "in_progress")
            .await?;
    let service = WorkOrderService::new(db);
    let now = at(2026, 10, 7, 16, 0);

    let assign = service
        .update_status(org.id, work_order.id, WorkOrderStatus::Assigned, None, now)
        .await;
    assert!(matches!(assign, Err(AppError::BadRequest(_))));

    let negative = service
        .update_status(org.id, work_order.id, WorkOrderStatus::Completed, Some(-1), now)
        .await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));

    Ok(())
}
