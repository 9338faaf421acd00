use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::visitor::VisitStatus,
    server::model::visitor_log::{CheckInParams, VisitorLog, VisitorLogFilter},
};

pub struct VisitorLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VisitorLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn check_in(&self, params: CheckInParams) -> Result<VisitorLog, DbErr> {
        let entity = entity::visitor_log::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            building_id: ActiveValue::Set(params.building_id),
            host_tenant_id: ActiveValue::Set(params.host_tenant_id),
            visitor_name: ActiveValue::Set(params.visitor_name),
            visitor_phone: ActiveValue::Set(params.visitor_phone),
            purpose: ActiveValue::Set(params.purpose),
            vehicle_plate: ActiveValue::Set(params.vehicle_plate),
            check_in: ActiveValue::Set(params.check_in),
            check_out: ActiveValue::Set(None),
            status: ActiveValue::Set(VisitStatus::CheckedIn.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        VisitorLog::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<VisitorLog>, DbErr> {
        entity::prelude::VisitorLog::find_by_id(id)
            .filter(entity::visitor_log::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(VisitorLog::from_entity)
            .transpose()
    }

    pub async fn check_out(
        &self,
        id: i32,
        check_out: DateTime<Utc>,
    ) -> Result<Option<VisitorLog>, DbErr> {
        let Some(visit) = entity::prelude::VisitorLog::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::visitor_log::ActiveModel = visit.into();
        active_model.check_out = ActiveValue::Set(Some(check_out));
        active_model.status = ActiveValue::Set(VisitStatus::CheckedOut.to_string());

        let entity = active_model.update(self.db).await?;

        VisitorLog::from_entity(entity).map(Some)
    }

    fn filtered(
        organization_id: i32,
        filter: VisitorLogFilter,
    ) -> sea_orm::Select<entity::prelude::VisitorLog> {
        let mut query = entity::prelude::VisitorLog::find()
            .filter(entity::visitor_log::Column::OrganizationId.eq(organization_id));

        if let Some(building_id) = filter.building_id {
            query = query.filter(entity::visitor_log::Column::BuildingId.eq(building_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::visitor_log::Column::Status.eq(status.to_string()));
        }
        if let Some(from) = filter.from {
            query = query.filter(entity::visitor_log::Column::CheckIn.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(entity::visitor_log::Column::CheckIn.lte(to));
        }

        query
    }

    /// Gets visits, latest check-in first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: VisitorLogFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<VisitorLog>, u64), DbErr> {
        let paginator = Self::filtered(organization_id, filter)
            .order_by_desc(entity::visitor_log::Column::CheckIn)
            .order_by_desc(entity::visitor_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let visits = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(VisitorLog::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((visits, total))
    }

    /// Gets every visit matching the filter, oldest check-in first.
    pub async fn get_all(
        &self,
        organization_id: i32,
        filter: VisitorLogFilter,
    ) -> Result<Vec<VisitorLog>, DbErr> {
        Self::filtered(organization_id, filter)
            .order_by_asc(entity::visitor_log::Column::CheckIn)
            .all(self.db)
            .await?
            .into_iter()
            .map(VisitorLog::from_entity)
            .collect()
    }

    /// Counts visits checked in with `start <= check_in < end`.
    pub async fn count_checked_in_between(
        &self,
        organization_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::VisitorLog::find()
            .filter(entity::visitor_log::Column::OrganizationId.eq(organization_id))
            .filter(entity::visitor_log::Column::CheckIn.gte(start))
            .filter(entity::visitor_log::Column::CheckIn.lt(end))
            .count(self.db)
            .await
    }

    pub async fn exists_for_building(&self, building_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::VisitorLog::find()
            .filter(entity::visitor_log::Column::BuildingId.eq(building_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
