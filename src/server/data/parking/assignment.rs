use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::parking::{ParkingAssignmentStatus, ParkingAssignmentType},
    server::model::parking::{
        CreateParkingAssignmentParams, ParkingAssignment, ParkingAssignmentFilter,
    },
};

pub struct ParkingAssignmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ParkingAssignmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active assignment.
    pub async fn create(
        &self,
        params: CreateParkingAssignmentParams,
    ) -> Result<ParkingAssignment, DbErr> {
        let entity = entity::parking_assignment::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            space_id: ActiveValue::Set(params.space_id),
            tenant_id: ActiveValue::Set(params.tenant_id),
            vehicle_plate: ActiveValue::Set(params.vehicle_plate),
            assignment_type: ActiveValue::Set(params.assignment_type.to_string()),
            start_time: ActiveValue::Set(params.start_time),
            end_time: ActiveValue::Set(None),
            status: ActiveValue::Set(ParkingAssignmentStatus::Active.to_string()),
            amount_charged: ActiveValue::Set(None),
            invoice_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ParkingAssignment::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<ParkingAssignment>, DbErr> {
        entity::prelude::ParkingAssignment::find_by_id(id)
            .filter(entity::parking_assignment::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(ParkingAssignment::from_entity)
            .transpose()
    }

    /// Gets assignments, most recent start first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ParkingAssignmentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ParkingAssignment>, u64), DbErr> {
        let mut query = entity::prelude::ParkingAssignment::find()
            .filter(entity::parking_assignment::Column::OrganizationId.eq(organization_id));

        if let Some(status) = filter.status {
            query =
                query.filter(entity::parking_assignment::Column::Status.eq(status.to_string()));
        }
        if let Some(space_id) = filter.space_id {
            query = query.filter(entity::parking_assignment::Column::SpaceId.eq(space_id));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(entity::parking_assignment::Column::TenantId.eq(tenant_id));
        }

        let paginator = query
            .order_by_desc(entity::parking_assignment::Column::StartTime)
            .order_by_desc(entity::parking_assignment::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let assignments = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(ParkingAssignment::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((assignments, total))
    }

    pub async fn find_active_for_space(
        &self,
        space_id: i32,
    ) -> Result<Option<ParkingAssignment>, DbErr> {
        entity::prelude::ParkingAssignment::find()
            .filter(entity::parking_assignment::Column::SpaceId.eq(space_id))
            .filter(
                entity::parking_assignment::Column::Status
                    .eq(ParkingAssignmentStatus::Active.to_string()),
            )
            .one(self.db)
            .await?
            .map(ParkingAssignment::from_entity)
            .transpose()
    }

    pub async fn exists_for_space(&self, space_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::ParkingAssignment::find()
            .filter(entity::parking_assignment::Column::SpaceId.eq(space_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active monthly assignments of a tenant, billed with the monthly rent invoice.
    pub async fn get_active_monthly_for_tenant(
        &self,
        tenant_id: i32,
    ) -> Result<Vec<ParkingAssignment>, DbErr> {
        entity::prelude::ParkingAssignment::find()
            .filter(entity::parking_assignment::Column::TenantId.eq(tenant_id))
            .filter(
                entity::parking_assignment::Column::Status
                    .eq(ParkingAssignmentStatus::Active.to_string()),
            )
            .filter(
                entity::parking_assignment::Column::AssignmentType
                    .eq(ParkingAssignmentType::Monthly.to_string()),
            )
            .order_by_asc(entity::parking_assignment::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ParkingAssignment::from_entity)
            .collect()
    }

    /// Closes an active assignment with its final charge.
    pub async fn complete(
        &self,
        id: i32,
        end_time: DateTime<Utc>,
        amount_charged: i64,
        invoice_id: Option<i32>,
    ) -> Result<Option<ParkingAssignment>, DbErr> {
        let Some(assignment) = entity::prelude::ParkingAssignment::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::parking_assignment::ActiveModel = assignment.into();
        active_model.end_time = ActiveValue::Set(Some(end_time));
        active_model.status = ActiveValue::Set(ParkingAssignmentStatus::Completed.to_string());
        active_model.amount_charged = ActiveValue::Set(Some(amount_charged));
        active_model.invoice_id = ActiveValue::Set(invoice_id);

        let entity = active_model.update(self.db).await?;

        ParkingAssignment::from_entity(entity).map(Some)
    }
}
