use super::*;
use crate::{
    model::visitor::VisitStatus,
    server::{model::visitor_log::CheckInParams, service::visitor_log::VisitorLogService},
};

/// Tests check-in normalizes contact details and check-out closes the visit once.
///
/// Expected: normalized phone and plate, checked out visit, second check-out conflicts
#[tokio::test]
async fn check_in_and_out() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let service = VisitorLogService::new(db);

    let visit = service
        .check_in(CheckInParams {
            organization_id: org.id,
            building_id: building.id,
            host_tenant_id: None,
            visitor_name: " Hanna Girma ".to_string(),
            visitor_phone: Some("0912 34 56 78".to_string()),
            purpose: "Delivery".to_string(),
            vehicle_plate: Some("aa 2 b123".to_string()),
            check_in: at(2026, 10, 8, 9, 0),
        })
        .await?;

    assert_eq!(visit.visitor_name, "Hanna Girma");
    assert_eq!(visit.visitor_phone.as_deref(), Some("0912345678"));
    assert_eq!(visit.vehicle_plate.as_deref(), Some("AA2B123"));
    assert_eq!(visit.status, VisitStatus::CheckedIn);

    let early = service
        .check_out(org.id, visit.id, at(2026, 10, 8, 8, 0))
        .await;
    assert!(matches!(early, Err(AppError::BadRequest(_))));

    let out = service
        .check_out(org.id, visit.id, at(2026, 10, 8, 9, 45))
        .await?;
    assert_eq!(out.status, VisitStatus::CheckedOut);
    assert_eq!(out.check_out, Some(at(2026, 10, 8, 9, 45)));

    let again = service
        .check_out(org.id, visit.id, at(2026, 10, 8, 10, 0))
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests analytics over a range counts visits, open visits and mean duration.
///
/// Expected: 3 visits, 1 still inside, average of 30 and 90 minutes
#[tokio::test]
async fn analytics_summarizes_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Hanna",
        "Delivery",
        at(2026, 10, 8, 9, 0),
        Some(at(2026, 10, 8, 9, 30)),
    )
    .await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Yonas",
        "Meeting",
        at(2026, 10, 8, 11, 0),
        Some(at(2026, 10, 8, 12, 30)),
    )
    .await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Meron",
        "Delivery",
        at(2026, 10, 9, 15, 0),
        None,
    )
    .await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Outside range",
        "Delivery",
        at(2026, 9, 1, 10, 0),
        None,
    )
    .await?;

    let analytics = VisitorLogService::new(db)
        .analytics(org.id, at(2026, 10, 1, 0, 0), at(2026, 10, 31, 0, 0), None)
        .await?;

    assert_eq!(analytics.total_visits, 3);
    assert_eq!(analytics.currently_checked_in, 1);
    assert_eq!(analytics.average_duration_minutes, Some(60.0));
    assert_eq!(analytics.by_purpose[0].label, "Delivery");
    assert_eq!(analytics.by_purpose[0].count, 2);

    Ok(())
}

/// Tests a reversed range is rejected.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn analytics_rejects_reversed_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;

    let result = VisitorLogService::new(db)
        .analytics(org.id, at(2026, 10, 31, 0, 0), at(2026, 10, 1, 0, 0), None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
