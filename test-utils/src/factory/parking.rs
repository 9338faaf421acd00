//! Parking factories: spaces, pricing and assignments.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an available standard space in the building.
pub async fn create_space(
    db: &DatabaseConnection,
    organization_id: i32,
    building_id: i32,
) -> Result<entity::parking_space::Model, DbErr> {
    create_space_with_status(db, organization_id, building_id, "available").await
}

pub async fn create_space_with_status(
    db: &DatabaseConnection,
    organization_id: i32,
    building_id: i32,
    status: &str,
) -> Result<entity::parking_space::Model, DbErr> {
    entity::parking_space::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        building_id: ActiveValue::Set(building_id),
        space_number: ActiveValue::Set(format!("P-{}", next_id())),
        space_type: ActiveValue::Set("standard".to_string()),
        status: ActiveValue::Set(status.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates active standard pricing: 5_000/hour, 50_000/day, 600_000/month.
pub async fn create_standard_pricing(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<entity::parking_pricing::Model, DbErr> {
    entity::parking_pricing::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        space_type: ActiveValue::Set("standard".to_string()),
        hourly_rate: ActiveValue::Set(5_000),
        daily_rate: ActiveValue::Set(50_000),
        monthly_rate: ActiveValue::Set(600_000),
        active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an active assignment on the space. The space status is left untouched.
pub async fn create_active_assignment(
    db: &DatabaseConnection,
    organization_id: i32,
    space_id: i32,
    tenant_id: Option<i32>,
    assignment_type: &str,
    start_time: DateTime<Utc>,
) -> Result<entity::parking_assignment::Model, DbErr> {
    entity::parking_assignment::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        space_id: ActiveValue::Set(space_id),
        tenant_id: ActiveValue::Set(tenant_id),
        vehicle_plate: ActiveValue::Set(format!("AA{}", next_id())),
        assignment_type: ActiveValue::Set(assignment_type.to_string()),
        start_time: ActiveValue::Set(start_time),
        end_time: ActiveValue::Set(None),
        status: ActiveValue::Set("active".to_string()),
        amount_charged: ActiveValue::Set(None),
        invoice_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
