use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::maintenance::WorkOrderStatus,
    server::model::work_order::{CreateWorkOrderParams, WorkOrder, WorkOrderFilter},
};

pub struct WorkOrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkOrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an open, unassigned work order.
    pub async fn create(&self, params: CreateWorkOrderParams) -> Result<WorkOrder, DbErr> {
        let entity = entity::work_order::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            building_id: ActiveValue::Set(params.building_id),
            unit_id: ActiveValue::Set(params.unit_id),
            complaint_id: ActiveValue::Set(params.complaint_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            priority: ActiveValue::Set(params.priority.to_string()),
            status: ActiveValue::Set(WorkOrderStatus::Open.to_string()),
            assigned_to: ActiveValue::Set(None),
            estimated_cost: ActiveValue::Set(params.estimated_cost),
            actual_cost: ActiveValue::Set(None),
            due_date: ActiveValue::Set(params.due_date),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        WorkOrder::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<WorkOrder>, DbErr> {
        entity::prelude::WorkOrder::find_by_id(id)
            .filter(entity::work_order::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(WorkOrder::from_entity)
            .transpose()
    }

    /// Gets work orders newest first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: WorkOrderFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<WorkOrder>, u64), DbErr> {
        let mut query = entity::prelude::WorkOrder::find()
            .filter(entity::work_order::Column::OrganizationId.eq(organization_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::work_order::Column::Status.eq(status.to_string()));
        }
        if let Some(building_id) = filter.building_id {
            query = query.filter(entity::work_order::Column::BuildingId.eq(building_id));
        }
        if let Some(assigned_to) = filter.assigned_to {
            query = query.filter(entity::work_order::Column::AssignedTo.eq(assigned_to));
        }

        let paginator = query
            .order_by_desc(entity::work_order::Column::CreatedAt)
            .order_by_desc(entity::work_order::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let work_orders = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(WorkOrder::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((work_orders, total))
    }

    pub async fn assign(&self, id: i32, user_id: i32) -> Result<Option<WorkOrder>, DbErr> {
        let Some(work_order) = entity::prelude::WorkOrder::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::work_order::ActiveModel = work_order.into();
        active_model.assigned_to = ActiveValue::Set(Some(user_id));
        active_model.status = ActiveValue::Set(WorkOrderStatus::Assigned.to_string());

        let entity = active_model.update(self.db).await?;

        WorkOrder::from_entity(entity).map(Some)
    }

    /// Sets a new status; `actual_cost` and `completed_at` are only written when provided.
    pub async fn update_status(
        &self,
        id: i32,
        status: WorkOrderStatus,
        actual_cost: Option<i64>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<WorkOrder>, DbErr> {
        let Some(work_order) = entity::prelude::WorkOrder::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::work_order::ActiveModel = work_order.into();
        active_model.status = ActiveValue::Set(status.to_string());
        if let Some(actual_cost) = actual_cost {
            active_model.actual_cost = ActiveValue::Set(Some(actual_cost));
        }
        if let Some(completed_at) = completed_at {
            active_model.completed_at = ActiveValue::Set(Some(completed_at));
        }

        let entity = active_model.update(self.db).await?;

        WorkOrder::from_entity(entity).map(Some)
    }

    /// Counts work orders that are not completed or cancelled.
    pub async fn count_open(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::WorkOrder::find()
            .filter(entity::work_order::Column::OrganizationId.eq(organization_id))
            .filter(entity::work_order::Column::Status.is_in([
                WorkOrderStatus::Open.to_string(),
                WorkOrderStatus::Assigned.to_string(),
                WorkOrderStatus::InProgress.to_string(),
            ]))
            .count(self.db)
            .await
    }

    pub async fn exists_for_building(&self, building_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::WorkOrder::find()
            .filter(entity::work_order::Column::BuildingId.eq(building_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
