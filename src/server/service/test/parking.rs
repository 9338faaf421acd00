use super::*;
use crate::{
    model::{
        billing::InvoiceItemCategory,
        parking::{
            ParkingAssignmentStatus, ParkingAssignmentType, ParkingSpaceStatus, ParkingSpaceType,
            ViolationStatus, ViolationType,
        },
    },
    server::{
        model::parking::{
            CreateParkingAssignmentParams, CreateParkingViolationParams, ParkingSpaceFilter,
            SetParkingPricingParams,
        },
        service::{
            invoice::InvoiceService,
            parking::{
                assignment::ParkingAssignmentService, pricing::ParkingPricingService,
                space::ParkingSpaceService, violation::ParkingViolationService,
            },
        },
    },
};

fn assignment(
    organization_id: i32,
    space_id: i32,
    tenant_id: Option<i32>,
    assignment_type: ParkingAssignmentType,
) -> CreateParkingAssignmentParams {
    CreateParkingAssignmentParams {
        organization_id,
        space_id,
        tenant_id,
        vehicle_plate: " aa 3-12345 ".to_string(),
        assignment_type,
        start_time: at(2026, 10, 5, 8, 0),
    }
}

fn space_numbers(numbers: &[&str]) -> Vec<String> {
    numbers.iter().map(|number| number.to_string()).collect()
}

/// Tests assigning a space normalizes the plate and occupies the space.
///
/// Expected: active assignment for AA3-12345, space occupied, second assignment conflicts
#[tokio::test]
async fn create_occupies_space() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    let service = ParkingAssignmentService::new(db);

    let created = service
        .create(assignment(org.id, space.id, None, ParkingAssignmentType::Hourly))
        .await?;

    assert_eq!(created.vehicle_plate, "AA3-12345");
    assert_eq!(created.status, ParkingAssignmentStatus::Active);

    let space = ParkingSpaceService::new(db).get(org.id, space.id).await?;
    assert_eq!(space.status, ParkingSpaceStatus::Occupied);

    let again = service
        .create(assignment(org.id, space.id, None, ParkingAssignmentType::Hourly))
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests monthly parking needs a tenant to bill.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn create_rejects_monthly_without_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;

    let result = ParkingAssignmentService::new(db)
        .create(assignment(org.id, space.id, None, ParkingAssignmentType::Monthly))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests spaces can't be assigned without active pricing.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn create_requires_pricing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;

    let result = ParkingAssignmentService::new(db)
        .create(assignment(org.id, space.id, None, ParkingAssignmentType::Hourly))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests partial hours are charged as started hours.
///
/// Expected: 2h30m estimates 3 hours at 5_000
#[tokio::test]
async fn estimate_rounds_up_started_hours() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    let service = ParkingAssignmentService::new(db);

    let created = service
        .create(assignment(org.id, space.id, None, ParkingAssignmentType::Hourly))
        .await?;
    let charge = service
        .estimate(org.id, created.id, at(2026, 10, 5, 10, 30))
        .await?;

    assert_eq!(charge.units, 3);
    assert_eq!(charge.rate, 5_000);
    assert_eq!(charge.amount, 15_000);

    Ok(())
}

/// Tests ending a tenant's hourly stay invoices it and frees the space.
///
/// Expected: completed assignment charged 15_000 with an invoice of one parking item
#[tokio::test]
async fn end_invoices_tenant_stay() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    let service = ParkingAssignmentService::new(db);

    let created = service
        .create(assignment(
            org.id,
            space.id,
            Some(tenant.id),
            ParkingAssignmentType::Hourly,
        ))
        .await?;
    let ended = service
        .end(org.id, created.id, at(2026, 10, 5, 10, 30), 7, date(2026, 10, 5))
        .await?;

    assert_eq!(ended.status, ParkingAssignmentStatus::Completed);
    assert_eq!(ended.amount_charged, Some(15_000));

    let invoice = InvoiceService::new(db)
        .get(org.id, ended.invoice_id.unwrap())
        .await?;
    assert_eq!(invoice.tenant_id, tenant.id);
    assert_eq!(invoice.total, 15_000);
    assert_eq!(invoice.due_date, date(2026, 10, 12));
    assert_eq!(invoice.items[0].category, InvoiceItemCategory::Parking);
    assert_eq!(invoice.items[0].quantity, 3);
    assert_eq!(invoice.items[0].parking_assignment_id, Some(created.id));

    let space = ParkingSpaceService::new(db).get(org.id, space.id).await?;
    assert_eq!(space.status, ParkingSpaceStatus::Available);

    Ok(())
}

/// Tests walk-in stays without a tenant are charged but not invoiced.
///
/// Expected: amount charged, no invoice
#[tokio::test]
async fn end_without_tenant_skips_invoice() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    let service = ParkingAssignmentService::new(db);

    let created = service
        .create(assignment(org.id, space.id, None, ParkingAssignmentType::Daily))
        .await?;
    let ended = service
        .end(org.id, created.id, at(2026, 10, 5, 9, 0), 7, date(2026, 10, 5))
        .await?;

    assert_eq!(ended.amount_charged, Some(50_000));
    assert_eq!(ended.invoice_id, None);

    Ok(())
}

/// Tests bulk space creation rejects taken numbers before inserting anything.
///
/// Expected: Err(AppError::Conflict) for a duplicate inside the batch and for an existing
/// number; a clean batch creates trimmed numbers
#[tokio::test]
async fn create_many_spaces_is_all_or_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let service = ParkingSpaceService::new(db);

    let duplicate = service
        .create_many(
            org.id,
            building.id,
            ParkingSpaceType::Standard,
            space_numbers(&["A1", "A2", "A1"]),
        )
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let created = service
        .create_many(
            org.id,
            building.id,
            ParkingSpaceType::Compact,
            space_numbers(&[" A1 ", "A2"]),
        )
        .await?;
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].space_number, "A1");
    assert_eq!(created[0].status, ParkingSpaceStatus::Available);

    let existing = service
        .create_many(
            org.id,
            building.id,
            ParkingSpaceType::Standard,
            space_numbers(&["A3", "A2"]),
        )
        .await;
    assert!(matches!(existing, Err(AppError::Conflict(_))));

    let spaces = service
        .get_paginated(
            org.id,
            ParkingSpaceFilter {
                building_id: Some(building.id),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(spaces.total, 2);

    Ok(())
}

/// Tests spaces that are occupied or were ever assigned are kept.
///
/// Expected: Err(AppError::Conflict) for both, an unused space is deleted
#[tokio::test]
async fn delete_space_keeps_assignment_history() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let occupied =
        factory::parking::create_space_with_status(db, org.id, building.id, "occupied").await?;
    factory::parking::create_active_assignment(
        db,
        org.id,
        occupied.id,
        None,
        "hourly",
        at(2026, 10, 5, 8, 0),
    )
    .await?;
    let previously_used = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_active_assignment(
        db,
        org.id,
        previously_used.id,
        None,
        "daily",
        at(2026, 9, 1, 8, 0),
    )
    .await?;
    let unused = factory::parking::create_space(db, org.id, building.id).await?;
    let service = ParkingSpaceService::new(db);

    let result = service.delete(org.id, occupied.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let result = service.delete(org.id, previously_used.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    service.delete(org.id, unused.id).await?;
    let result = service.get(org.id, unused.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests setting pricing deactivates the previous active pricing of the space type.
///
/// Expected: two pricings kept, only the new one active; negative rates rejected
#[tokio::test]
async fn set_pricing_replaces_active() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let previous = factory::parking::create_standard_pricing(db, org.id).await?;
    let service = ParkingPricingService::new(db);
    let rates = |hourly_rate| SetParkingPricingParams {
        organization_id: org.id,
        space_type: ParkingSpaceType::Standard,
        hourly_rate,
        daily_rate: 60_000,
        monthly_rate: 700_000,
    };

    let current = service.set(rates(6_000)).await?;
    assert!(current.active);
    assert_eq!(current.monthly_rate, 700_000);

    let all = service.get_all(org.id, false).await?;
    assert_eq!(all.len(), 2);
    assert!(all
        .iter()
        .any(|pricing| pricing.id == previous.id && !pricing.active));

    let active = service.get_all(org.id, true).await?;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, current.id);

    let negative = service.set(rates(-1)).await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));
    assert_eq!(service.get_all(org.id, true).await?[0].id, current.id);

    Ok(())
}

/// Tests a violation is resolved once, as paid or dismissed.
///
/// Expected: normalized plate, paid with a resolution time, then Err(AppError::Conflict);
/// resolving back to open is Err(AppError::BadRequest)
#[tokio::test]
async fn resolve_violation_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let service = ParkingViolationService::new(db);
    let now = at(2026, 10, 6, 10, 0);

    let violation = service
        .issue(CreateParkingViolationParams {
            organization_id: org.id,
            space_id: None,
            vehicle_plate: " aa 3-777 ".to_string(),
            violation_type: ViolationType::Overstay,
            fine_amount: 20_000,
            notes: None,
            issued_at: at(2026, 10, 5, 18, 0),
        })
        .await?;
    assert_eq!(violation.vehicle_plate, "AA3-777");
    assert_eq!(violation.status, ViolationStatus::Open);

    let reopen = service
        .resolve(org.id, violation.id, ViolationStatus::Open, now)
        .await;
    assert!(matches!(reopen, Err(AppError::BadRequest(_))));

    let paid = service
        .resolve(org.id, violation.id, ViolationStatus::Paid, now)
        .await?;
    assert_eq!(paid.status, ViolationStatus::Paid);
    assert_eq!(paid.resolved_at, Some(now));

    let dismissed = service
        .resolve(org.id, violation.id, ViolationStatus::Dismissed, now)
        .await;
    assert!(matches!(dismissed, Err(AppError::Conflict(_))));

    Ok(())
}
