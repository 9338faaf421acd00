//! Tenant (resident) factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct TenantFactory<'a> {
    db: &'a DatabaseConnection,
    organization_id: i32,
    name: String,
    phone: String,
    status: String,
}

impl<'a> TenantFactory<'a> {
    /// Defaults: `"Tenant {id}"`, phone `"07{id:08}"`, active.
    pub fn new(db: &'a DatabaseConnection, organization_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            organization_id,
            name: format!("Tenant {}", id),
            phone: format!("07{:08}", id),
            status: "active".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::tenant::Model, DbErr> {
        entity::tenant::ActiveModel {
            organization_id: ActiveValue::Set(self.organization_id),
            name: ActiveValue::Set(self.name),
            phone: ActiveValue::Set(self.phone),
            email: ActiveValue::Set(None),
            national_id: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_tenant(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<entity::tenant::Model, DbErr> {
    TenantFactory::new(db, organization_id).build().await
}
