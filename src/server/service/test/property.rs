use super::*;
use crate::{
    model::tenant::TenantStatus,
    server::{
        model::{
            tenant::TenantParams,
            unit::{CreateUnitParams, UnitFilter},
        },
        service::{building::BuildingService, tenant::TenantService, unit::UnitService},
    },
};

fn new_unit(organization_id: i32, building_id: i32, unit_number: &str) -> CreateUnitParams {
    CreateUnitParams {
        organization_id,
        building_id,
        unit_number: unit_number.to_string(),
        floor: 2,
        area_sqm: Some(80),
        monthly_rent: 900_000,
    }
}

fn new_tenant(organization_id: i32, phone: &str) -> TenantParams {
    TenantParams {
        organization_id,
        name: "Meron Girma".to_string(),
        phone: phone.to_string(),
        email: None,
        national_id: None,
        status: TenantStatus::Active,
    }
}

/// Tests bulk unit creation inserts nothing when any number is taken.
///
/// Expected: Err(AppError::Conflict) for a duplicate inside the batch and for an existing
/// number, only the existing unit left; a clean batch creates both units
#[tokio::test]
async fn create_many_units_is_all_or_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    factory::unit::UnitFactory::new(db, org.id, building.id)
        .unit_number("101")
        .build()
        .await?;
    let service = UnitService::new(db);

    let duplicate_in_batch = service
        .create_many(
            building.id,
            vec![
                new_unit(org.id, building.id, "201"),
                new_unit(org.id, building.id, "202"),
                new_unit(org.id, building.id, "201"),
            ],
        )
        .await;
    assert!(matches!(duplicate_in_batch, Err(AppError::Conflict(_))));

    let existing = service
        .create_many(
            building.id,
            vec![
                new_unit(org.id, building.id, "301"),
                new_unit(org.id, building.id, "101"),
            ],
        )
        .await;
    assert!(matches!(existing, Err(AppError::Conflict(_))));

    let filter = UnitFilter {
        building_id: Some(building.id),
        ..Default::default()
    };
    let units = service.get_paginated(org.id, filter.clone(), 0, 10).await?;
    assert_eq!(units.total, 1);

    let created = service
        .create_many(
            building.id,
            vec![
                new_unit(org.id, building.id, "201"),
                new_unit(org.id, building.id, "202"),
            ],
        )
        .await?;
    assert_eq!(created.len(), 2);
    assert_eq!(service.get_paginated(org.id, filter, 0, 10).await?.total, 3);

    Ok(())
}

/// Tests units with lease history are kept.
///
/// Expected: Err(AppError::Conflict) for the leased and the formerly leased unit, a unit
/// never leased is deleted
#[tokio::test]
async fn delete_unit_keeps_lease_history() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (building, leased, tenant, _) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let formerly_leased = factory::create_unit(db, org.id, building.id).await?;
    factory::lease::LeaseFactory::new(db, org.id, tenant.id, formerly_leased.id)
        .status("terminated")
        .build()
        .await?;
    let never_leased = factory::create_unit(db, org.id, building.id).await?;
    let service = UnitService::new(db);

    let result = service.delete(org.id, leased.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let result = service.delete(org.id, formerly_leased.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    service.delete(org.id, never_leased.id).await?;
    let result = service.get(org.id, never_leased.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests buildings are deleted only once empty and without visitor or work order history.
///
/// Expected: Err(AppError::Conflict) for a building with units and one with visits, an
/// empty building is deleted
#[tokio::test]
async fn delete_building_requires_empty_building() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (with_unit, _) = factory::helpers::create_building_with_unit(db, org.id).await?;
    let visited = factory::create_building(db, org.id).await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        visited.id,
        "Kebede Ayele",
        "Delivery",
        at(2026, 10, 1, 9, 0),
        Some(at(2026, 10, 1, 9, 30)),
    )
    .await?;
    let empty = factory::create_building(db, org.id).await?;
    let service = BuildingService::new(db);

    let result = service.delete(org.id, with_unit.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let result = service.delete(org.id, visited.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    service.delete(org.id, empty.id).await?;

    Ok(())
}

/// Tests tenant phones are unique within an organization after normalization.
///
/// Expected: Err(AppError::Conflict) on create and on update; other organizations may reuse
/// the phone
#[tokio::test]
async fn tenant_phone_is_unique_per_organization() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let other_org = factory::create_organization(db).await?;
    factory::tenant::TenantFactory::new(db, org.id)
        .phone("0911223344")
        .build()
        .await?;
    let service = TenantService::new(db);

    let created = service.create(new_tenant(org.id, "0911 223 344")).await;
    assert!(matches!(created, Err(AppError::Conflict(_))));

    let second = service.create(new_tenant(org.id, "0922 000 111")).await?;
    assert_eq!(second.phone, "0922000111");
    let updated = service
        .update(second.id, new_tenant(org.id, "(0911) 223-344"))
        .await;
    assert!(matches!(updated, Err(AppError::Conflict(_))));

    let elsewhere = service
        .create(new_tenant(other_org.id, "0911223344"))
        .await?;
    assert_eq!(elsewhere.organization_id, other_org.id);

    Ok(())
}

/// Tests tenants with billing or complaint history are kept.
///
/// Expected: Err(AppError::Conflict) for the invoiced and the complaining tenant, a tenant
/// without history is deleted
#[tokio::test]
async fn delete_tenant_keeps_history() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let invoiced = factory::create_tenant(db, org.id).await?;
    factory::invoice::create_invoice(db, org.id, invoiced.id).await?;
    let complaining = factory::create_tenant(db, org.id).await?;
    factory::complaint::create_complaint(db, org.id, complaining.id, "closed").await?;
    let fresh = factory::create_tenant(db, org.id).await?;
    let service = TenantService::new(db);

    let result = service.delete(org.id, invoiced.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let result = service.delete(org.id, complaining.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    service.delete(org.id, fresh.id).await?;
    let result = service.get(org.id, fresh.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
