//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values (phones, slugs, numbers) in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a building with a single vacant unit in the organization.
pub async fn create_building_with_unit(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<(entity::building::Model, entity::unit::Model), DbErr> {
    let building = crate::factory::building::create_building(db, organization_id).await?;
    let unit = crate::factory::unit::create_unit(db, organization_id, building.id).await?;

    Ok((building, unit))
}

/// Creates a building, unit, tenant and active lease covering 2026.
///
/// # Returns
/// - `Ok((building, unit, tenant, lease))` - Created entities; the unit is marked occupied
pub async fn create_active_lease_with_dependencies(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<
    (
        entity::building::Model,
        entity::unit::Model,
        entity::tenant::Model,
        entity::lease::Model,
    ),
    DbErr,
> {
    let building = crate::factory::building::create_building(db, organization_id).await?;
    let unit = crate::factory::unit::UnitFactory::new(db, organization_id, building.id)
        .status("occupied")
        .build()
        .await?;
    let tenant = crate::factory::tenant::create_tenant(db, organization_id).await?;
    let lease = crate::factory::lease::create_lease(db, organization_id, tenant.id, unit.id).await?;

    Ok((building, unit, tenant, lease))
}
