use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::tenant::LeaseStatus,
    server::model::lease::{CreateLeaseParams, Lease, LeaseFilter},
};

pub struct LeaseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeaseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active lease with an already resolved monthly rent.
    pub async fn create(
        &self,
        params: &CreateLeaseParams,
        monthly_rent: i64,
    ) -> Result<Lease, DbErr> {
        let entity = entity::lease::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            tenant_id: ActiveValue::Set(params.tenant_id),
            unit_id: ActiveValue::Set(params.unit_id),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            monthly_rent: ActiveValue::Set(monthly_rent),
            deposit: ActiveValue::Set(params.deposit),
            status: ActiveValue::Set(LeaseStatus::Active.to_string()),
            terminated_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Lease::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Lease>, DbErr> {
        entity::prelude::Lease::find_by_id(id)
            .filter(entity::lease::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(Lease::from_entity)
            .transpose()
    }

    /// Gets leases newest first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: LeaseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Lease>, u64), DbErr> {
        let mut query = entity::prelude::Lease::find()
            .filter(entity::lease::Column::OrganizationId.eq(organization_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::lease::Column::Status.eq(status.to_string()));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(entity::lease::Column::TenantId.eq(tenant_id));
        }
        if let Some(unit_id) = filter.unit_id {
            query = query.filter(entity::lease::Column::UnitId.eq(unit_id));
        }

        let paginator = query
            .order_by_desc(entity::lease::Column::StartDate)
            .order_by_desc(entity::lease::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let leases = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Lease::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((leases, total))
    }

    pub async fn find_active_for_unit(&self, unit_id: i32) -> Result<Option<Lease>, DbErr> {
        entity::prelude::Lease::find()
            .filter(entity::lease::Column::UnitId.eq(unit_id))
            .filter(entity::lease::Column::Status.eq(LeaseStatus::Active.to_string()))
            .one(self.db)
            .await?
            .map(Lease::from_entity)
            .transpose()
    }

    pub async fn exists_for_unit(&self, unit_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Lease::find()
            .filter(entity::lease::Column::UnitId.eq(unit_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn exists_for_tenant(&self, tenant_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Lease::find()
            .filter(entity::lease::Column::TenantId.eq(tenant_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Ends a lease as terminated or expired.
    pub async fn close(
        &self,
        id: i32,
        status: LeaseStatus,
        terminated_at: Option<NaiveDate>,
    ) -> Result<Option<Lease>, DbErr> {
        let Some(lease) = entity::prelude::Lease::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::lease::ActiveModel = lease.into();
        active_model.status = ActiveValue::Set(status.to_string());
        active_model.terminated_at = ActiveValue::Set(terminated_at);

        let entity = active_model.update(self.db).await?;

        Lease::from_entity(entity).map(Some)
    }

    /// Active leases whose end date is before `today`, across all organizations.
    pub async fn get_expired_active(&self, today: NaiveDate) -> Result<Vec<Lease>, DbErr> {
        entity::prelude::Lease::find()
            .filter(entity::lease::Column::Status.eq(LeaseStatus::Active.to_string()))
            .filter(entity::lease::Column::EndDate.lt(today))
            .all(self.db)
            .await?
            .into_iter()
            .map(Lease::from_entity)
            .collect()
    }

    /// Active leases of an organization with at least one day inside `[first, last]`.
    pub async fn get_active_overlapping(
        &self,
        organization_id: i32,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Lease>, DbErr> {
        entity::prelude::Lease::find()
            .filter(entity::lease::Column::OrganizationId.eq(organization_id))
            .filter(entity::lease::Column::Status.eq(LeaseStatus::Active.to_string()))
            .filter(entity::lease::Column::StartDate.lte(last))
            .filter(entity::lease::Column::EndDate.gte(first))
            .order_by_asc(entity::lease::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Lease::from_entity)
            .collect()
    }

    pub async fn count_active(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Lease::find()
            .filter(entity::lease::Column::OrganizationId.eq(organization_id))
            .filter(entity::lease::Column::Status.eq(LeaseStatus::Active.to_string()))
            .count(self.db)
            .await
    }
}
