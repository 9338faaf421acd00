use super::*;
use crate::{model::tenant::LeaseStatus, server::data::lease::LeaseRepository};

/// Tests only active leases ending before today are reported as expired.
///
/// Expected: the lease that ended yesterday; the one ending today and the terminated one
/// are excluded
#[tokio::test]
async fn get_expired_active_returns_past_end_dates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let today = date(2026, 6, 15);

    let unit_a = factory::create_unit(db, org.id, building.id).await?;
    let ended = factory::lease::LeaseFactory::new(db, org.id, tenant.id, unit_a.id)
        .dates(date(2026, 1, 1), date(2026, 6, 14))
        .build()
        .await?;

    let unit_b = factory::create_unit(db, org.id, building.id).await?;
    factory::lease::LeaseFactory::new(db, org.id, tenant.id, unit_b.id)
        .dates(date(2026, 1, 1), today)
        .build()
        .await?;

    let unit_c = factory::create_unit(db, org.id, building.id).await?;
    factory::lease::LeaseFactory::new(db, org.id, tenant.id, unit_c.id)
        .dates(date(2025, 1, 1), date(2025, 12, 31))
        .status("terminated")
        .build()
        .await?;

    let expired = LeaseRepository::new(db).get_expired_active(today).await?;

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, ended.id);

    Ok(())
}

/// Tests period overlap includes leases touching the first or last day.
///
/// Expected: leases ending on the first day and starting on the last day are included, a
/// lease ending the day before is not
#[tokio::test]
async fn get_active_overlapping_includes_boundaries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;

    let unit_a = factory::create_unit(db, org.id, building.id).await?;
    let ends_on_first = factory::lease::LeaseFactory::new(db, org.id, tenant.id, unit_a.id)
        .dates(date(2026, 1, 1), date(2026, 3, 1))
        .build()
        .await?;

    let unit_b = factory::create_unit(db, org.id, building.id).await?;
    let starts_on_last = factory::lease::LeaseFactory::new(db, org.id, tenant.id, unit_b.id)
        .dates(date(2026, 3, 31), date(2026, 12, 31))
        .build()
        .await?;

    let unit_c = factory::create_unit(db, org.id, building.id).await?;
    factory::lease::LeaseFactory::new(db, org.id, tenant.id, unit_c.id)
        .dates(date(2026, 1, 1), date(2026, 2, 28))
        .build()
        .await?;

    let leases = LeaseRepository::new(db)
        .get_active_overlapping(org.id, date(2026, 3, 1), date(2026, 3, 31))
        .await?;

    let ids: Vec<i32> = leases.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![ends_on_first.id, starts_on_last.id]);

    Ok(())
}

/// Tests closing a lease records the status and termination date.
///
/// Expected: Ok(Some(lease)) with terminated status and date
#[tokio::test]
async fn close_sets_status_and_termination_date() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, _, _, lease) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;

    let closed = LeaseRepository::new(db)
        .close(lease.id, LeaseStatus::Terminated, Some(date(2026, 5, 20)))
        .await?
        .unwrap();

    assert_eq!(closed.status, LeaseStatus::Terminated);
    assert_eq!(closed.terminated_at, Some(date(2026, 5, 20)));

    let active = LeaseRepository::new(db)
        .find_active_for_unit(lease.unit_id)
        .await?;
    assert!(active.is_none());

    Ok(())
}
