use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::parking::ViolationStatus,
    server::model::parking::{
        CreateParkingViolationParams, ParkingViolation, ParkingViolationFilter,
    },
};

pub struct ParkingViolationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ParkingViolationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an open violation.
    pub async fn create(
        &self,
        params: CreateParkingViolationParams,
    ) -> Result<ParkingViolation, DbErr> {
        let entity = entity::parking_violation::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            space_id: ActiveValue::Set(params.space_id),
            vehicle_plate: ActiveValue::Set(params.vehicle_plate),
            violation_type: ActiveValue::Set(params.violation_type.to_string()),
            fine_amount: ActiveValue::Set(params.fine_amount),
            status: ActiveValue::Set(ViolationStatus::Open.to_string()),
            notes: ActiveValue::Set(params.notes),
            issued_at: ActiveValue::Set(params.issued_at),
            resolved_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ParkingViolation::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<ParkingViolation>, DbErr> {
        entity::prelude::ParkingViolation::find_by_id(id)
            .filter(entity::parking_violation::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(ParkingViolation::from_entity)
            .transpose()
    }

    /// Gets violations, most recently issued first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ParkingViolationFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ParkingViolation>, u64), DbErr> {
        let mut query = entity::prelude::ParkingViolation::find()
            .filter(entity::parking_violation::Column::OrganizationId.eq(organization_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::parking_violation::Column::Status.eq(status.to_string()));
        }
        if let Some(plate) = filter.vehicle_plate {
            query = query.filter(entity::parking_violation::Column::VehiclePlate.eq(plate));
        }

        let paginator = query
            .order_by_desc(entity::parking_violation::Column::IssuedAt)
            .order_by_desc(entity::parking_violation::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let violations = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(ParkingViolation::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((violations, total))
    }

    pub async fn resolve(
        &self,
        id: i32,
        status: ViolationStatus,
        resolved_at: DateTime<Utc>,
    ) -> Result<Option<ParkingViolation>, DbErr> {
        let Some(violation) = entity::prelude::ParkingViolation::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::parking_violation::ActiveModel = violation.into();
        active_model.status = ActiveValue::Set(status.to_string());
        active_model.resolved_at = ActiveValue::Set(Some(resolved_at));

        let entity = active_model.update(self.db).await?;

        ParkingViolation::from_entity(entity).map(Some)
    }
}
