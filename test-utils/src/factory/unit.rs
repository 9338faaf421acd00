//! Unit factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct UnitFactory<'a> {
    db: &'a DatabaseConnection,
    organization_id: i32,
    building_id: i32,
    unit_number: String,
    monthly_rent: i64,
    status: String,
}

impl<'a> UnitFactory<'a> {
    /// Defaults: unit number `"U-{id}"`, rent 1_000_000, vacant.
    pub fn new(db: &'a DatabaseConnection, organization_id: i32, building_id: i32) -> Self {
        Self {
            db,
            organization_id,
            building_id,
            unit_number: format!("U-{}", next_id()),
            monthly_rent: 1_000_000,
            status: "vacant".to_string(),
        }
    }

    pub fn unit_number(mut self, unit_number: impl Into<String>) -> Self {
        self.unit_number = unit_number.into();
        self
    }

    pub fn monthly_rent(mut self, monthly_rent: i64) -> Self {
        self.monthly_rent = monthly_rent;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::unit::Model, DbErr> {
        entity::unit::ActiveModel {
            organization_id: ActiveValue::Set(self.organization_id),
            building_id: ActiveValue::Set(self.building_id),
            unit_number: ActiveValue::Set(self.unit_number),
            floor: ActiveValue::Set(1),
            area_sqm: ActiveValue::Set(Some(80)),
            monthly_rent: ActiveValue::Set(self.monthly_rent),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_unit(
    db: &DatabaseConnection,
    organization_id: i32,
    building_id: i32,
) -> Result<entity::unit::Model, DbErr> {
    UnitFactory::new(db, organization_id, building_id).build().await
}
