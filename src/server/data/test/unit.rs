use super::*;
use crate::{
    model::property::UnitStatus,
    server::{data::unit::UnitRepository, model::unit::UnitFilter},
};

/// Tests unit listing filters by building and status.
///
/// Expected: only the vacant unit of the first building is returned
#[tokio::test]
async fn filters_by_building_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    let other_building = factory::create_building(db, org.id).await?;

    let vacant = factory::create_unit(db, org.id, building.id).await?;
    factory::unit::UnitFactory::new(db, org.id, building.id)
        .status("occupied")
        .build()
        .await?;
    factory::create_unit(db, org.id, other_building.id).await?;

    let (units, total) = UnitRepository::new(db)
        .get_paginated(
            org.id,
            UnitFilter {
                building_id: Some(building.id),
                status: Some(UnitStatus::Vacant),
            },
            0,
            10,
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(units[0].id, vacant.id);

    Ok(())
}

/// Tests units of another organization are invisible.
///
/// Expected: None
#[tokio::test]
async fn find_in_organization_hides_foreign_units() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let other = factory::create_organization(db).await?;
    let (_, unit) = factory::helpers::create_building_with_unit(db, other.id).await?;

    let found = UnitRepository::new(db)
        .find_in_organization(org.id, unit.id)
        .await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests counting with and without a status.
///
/// Expected: 3 units in total, 2 of them occupied
#[tokio::test]
async fn counts_units_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_property_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let building = factory::create_building(db, org.id).await?;
    factory::create_unit(db, org.id, building.id).await?;
    for _ in 0..2 {
        factory::unit::UnitFactory::new(db, org.id, building.id)
            .status("occupied")
            .build()
            .await?;
    }

    let repo = UnitRepository::new(db);

    assert_eq!(repo.count(org.id, None).await?, 3);
    assert_eq!(repo.count(org.id, Some(UnitStatus::Occupied)).await?, 2);

    Ok(())
}
