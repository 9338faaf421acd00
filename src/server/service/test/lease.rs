use super::*;
use crate::{
    model::{property::UnitStatus, tenant::LeaseStatus},
    server::{
        data::unit::UnitRepository, model::lease::CreateLeaseParams, service::lease::LeaseService,
    },
};

fn params(organization_id: i32, tenant_id: i32, unit_id: i32) -> CreateLeaseParams {
    CreateLeaseParams {
        organization_id,
        tenant_id,
        unit_id,
        start_date: date(2026, 1, 1),
        end_date: date(2026, 12, 31),
        monthly_rent: None,
        deposit: 2_000_000,
    }
}

/// Tests creating a lease takes the unit's rent and occupies the unit.
///
/// Expected: active lease at the unit's listed rent, unit occupied
#[tokio::test]
async fn create_occupies_unit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, unit) = factory::helpers::create_building_with_unit(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;

    let lease = LeaseService::new(db)
        .create(params(org.id, tenant.id, unit.id))
        .await?;

    assert_eq!(lease.status, LeaseStatus::Active);
    assert_eq!(lease.monthly_rent, 1_000_000);

    let unit = UnitRepository::new(db)
        .find_in_organization(org.id, unit.id)
        .await?
        .unwrap();
    assert_eq!(unit.status, UnitStatus::Occupied);

    Ok(())
}

/// Tests a unit can't be leased twice.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn create_rejects_occupied_unit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, unit, _, _) = factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let other = factory::create_tenant(db, org.id).await?;

    let result = LeaseService::new(db)
        .create(params(org.id, other.id, unit.id))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests lease dates must be ordered.
///
/// Expected: Err(AppError::BadRequest) when the end date equals the start date
#[tokio::test]
async fn create_rejects_empty_term() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, unit) = factory::helpers::create_building_with_unit(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;

    let mut params = params(org.id, tenant.id, unit.id);
    params.end_date = params.start_date;
    let result = LeaseService::new(db).create(params).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests early termination records the date and frees the unit.
///
/// Expected: terminated lease with terminated_at set, unit vacant, second termination conflicts
#[tokio::test]
async fn terminate_frees_unit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, unit, _, lease) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let service = LeaseService::new(db);

    let terminated = service.terminate(org.id, lease.id, date(2026, 6, 30)).await?;

    assert_eq!(terminated.status, LeaseStatus::Terminated);
    assert_eq!(terminated.terminated_at, Some(date(2026, 6, 30)));

    let unit = UnitRepository::new(db)
        .find_in_organization(org.id, unit.id)
        .await?
        .unwrap();
    assert_eq!(unit.status, UnitStatus::Vacant);

    let again = service.terminate(org.id, lease.id, date(2026, 7, 1)).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests the termination date must fall inside the lease term.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn terminate_rejects_date_outside_term() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, _, _, lease) = factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;

    let result = LeaseService::new(db)
        .terminate(org.id, lease.id, date(2027, 1, 1))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests leases past their end date expire and release their units.
///
/// Expected: one lease expired, unit vacant, a second run expires nothing
#[tokio::test]
async fn expire_leases_releases_units() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, unit, _, lease) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let service = LeaseService::new(db);

    assert_eq!(service.expire_leases(date(2027, 1, 1)).await?, 1);

    let lease = service.get(org.id, lease.id).await?;
    assert_eq!(lease.status, LeaseStatus::Expired);

    let unit = UnitRepository::new(db)
        .find_in_organization(org.id, unit.id)
        .await?
        .unwrap();
    assert_eq!(unit.status, UnitStatus::Vacant);

    assert_eq!(service.expire_leases(date(2027, 1, 2)).await?, 0);

    Ok(())
}
