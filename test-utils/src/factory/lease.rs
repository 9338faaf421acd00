//! Lease factory.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct LeaseFactory<'a> {
    db: &'a DatabaseConnection,
    organization_id: i32,
    tenant_id: i32,
    unit_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    monthly_rent: i64,
    status: String,
}

impl<'a> LeaseFactory<'a> {
    /// Defaults: 2026-01-01 to 2026-12-31, rent 1_000_000, active.
    pub fn new(
        db: &'a DatabaseConnection,
        organization_id: i32,
        tenant_id: i32,
        unit_id: i32,
    ) -> Self {
        Self {
            db,
            organization_id,
            tenant_id,
            unit_id,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default(),
            monthly_rent: 1_000_000,
            status: "active".to_string(),
        }
    }

    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
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

    pub async fn build(self) -> Result<entity::lease::Model, DbErr> {
        entity::lease::ActiveModel {
            organization_id: ActiveValue::Set(self.organization_id),
            tenant_id: ActiveValue::Set(self.tenant_id),
            unit_id: ActiveValue::Set(self.unit_id),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            monthly_rent: ActiveValue::Set(self.monthly_rent),
            deposit: ActiveValue::Set(0),
            status: ActiveValue::Set(self.status),
            terminated_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_lease(
    db: &DatabaseConnection,
    organization_id: i32,
    tenant_id: i32,
    unit_id: i32,
) -> Result<entity::lease::Model, DbErr> {
    LeaseFactory::new(db, organization_id, tenant_id, unit_id)
        .build()
        .await
}
