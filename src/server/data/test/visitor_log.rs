use super::*;
use crate::{
    model::visitor::VisitStatus,
    server::{data::visitor_log::VisitorLogRepository, model::visitor_log::VisitorLogFilter},
};

/// Tests listing filters by status and orders latest check-in first.
///
/// Expected: the two open visits, newest first
#[tokio::test]
async fn filters_by_status_latest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;

    let morning = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    let noon = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();

    let early = factory::visitor_log::create_visit(
        db, org.id, building.id, "Abebe", "delivery", morning, None,
    )
    .await?;
    let late =
        factory::visitor_log::create_visit(db, org.id, building.id, "Sara", "guest", noon, None)
            .await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Kebede",
        "guest",
        morning,
        Some(noon),
    )
    .await?;

    let (visits, total) = VisitorLogRepository::new(db)
        .get_paginated(
            org.id,
            VisitorLogFilter {
                status: Some(VisitStatus::CheckedIn),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(total, 2);
    let ids: Vec<i32> = visits.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![late.id, early.id]);

    Ok(())
}

/// Tests the check-in count uses a half-open range.
///
/// Expected: 1; a check-in exactly at the range end is excluded
#[tokio::test]
async fn counts_check_ins_in_half_open_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;

    let start = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 10, 2, 0, 0, 0).unwrap();

    factory::visitor_log::create_visit(db, org.id, building.id, "A", "guest", start, None)
        .await?;
    factory::visitor_log::create_visit(db, org.id, building.id, "B", "guest", end, None).await?;

    let count = VisitorLogRepository::new(db)
        .count_checked_in_between(org.id, start, end)
        .await?;

    assert_eq!(count, 1);

    Ok(())
}
