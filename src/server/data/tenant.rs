use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::tenant::TenantStatus,
    server::model::tenant::{Tenant, TenantParams},
};

pub struct TenantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TenantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: TenantParams) -> Result<Tenant, DbErr> {
        let entity = entity::tenant::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            name: ActiveValue::Set(params.name),
            phone: ActiveValue::Set(params.phone),
            email: ActiveValue::Set(params.email),
            national_id: ActiveValue::Set(params.national_id),
            status: ActiveValue::Set(params.status.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Tenant::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Tenant>, DbErr> {
        entity::prelude::Tenant::find_by_id(id)
            .filter(entity::tenant::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(Tenant::from_entity)
            .transpose()
    }

    /// Checks whether another tenant of the organization already uses the phone.
    pub async fn phone_exists(
        &self,
        organization_id: i32,
        phone: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Tenant::find()
            .filter(entity::tenant::Column::OrganizationId.eq(organization_id))
            .filter(entity::tenant::Column::Phone.eq(phone));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::tenant::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets tenants ordered by name, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        status: Option<TenantStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Tenant>, u64), DbErr> {
        let mut query = entity::prelude::Tenant::find()
            .filter(entity::tenant::Column::OrganizationId.eq(organization_id));

        if let Some(status) = status {
            query = query.filter(entity::tenant::Column::Status.eq(status.to_string()));
        }

        let paginator = query
            .order_by_asc(entity::tenant::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let tenants = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Tenant::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tenants, total))
    }

    pub async fn update(&self, id: i32, params: TenantParams) -> Result<Option<Tenant>, DbErr> {
        let Some(tenant) = entity::prelude::Tenant::find_by_id(id)
            .filter(entity::tenant::Column::OrganizationId.eq(params.organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::tenant::ActiveModel = tenant.into();
        active_model.name = ActiveValue::Set(params.name);
        active_model.phone = ActiveValue::Set(params.phone);
        active_model.email = ActiveValue::Set(params.email);
        active_model.national_id = ActiveValue::Set(params.national_id);
        active_model.status = ActiveValue::Set(params.status.to_string());

        let entity = active_model.update(self.db).await?;

        Tenant::from_entity(entity).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Tenant::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count_active(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Tenant::find()
            .filter(entity::tenant::Column::OrganizationId.eq(organization_id))
            .filter(entity::tenant::Column::Status.eq(TenantStatus::Active.to_string()))
            .count(self.db)
            .await
    }
}
