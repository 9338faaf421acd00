use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::parking::ParkingSpaceStatus,
    server::model::parking::{
        CreateParkingSpaceParams, ParkingSpace, ParkingSpaceFilter, UpdateParkingSpaceParams,
    },
};

pub struct ParkingSpaceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ParkingSpaceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an available space.
    pub async fn create(&self, params: CreateParkingSpaceParams) -> Result<ParkingSpace, DbErr> {
        let entity = entity::parking_space::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            building_id: ActiveValue::Set(params.building_id),
            space_number: ActiveValue::Set(params.space_number),
            space_type: ActiveValue::Set(params.space_type.to_string()),
            status: ActiveValue::Set(ParkingSpaceStatus::Available.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ParkingSpace::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<ParkingSpace>, DbErr> {
        entity::prelude::ParkingSpace::find_by_id(id)
            .filter(entity::parking_space::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(ParkingSpace::from_entity)
            .transpose()
    }

    /// Space numbers already used in a building, optionally ignoring one space.
    pub async fn existing_numbers(
        &self,
        building_id: i32,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>, DbErr> {
        let mut query = entity::prelude::ParkingSpace::find()
            .select_only()
            .column(entity::parking_space::Column::SpaceNumber)
            .filter(entity::parking_space::Column::BuildingId.eq(building_id));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::parking_space::Column::Id.ne(exclude_id));
        }

        query.into_tuple::<String>().all(self.db).await
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ParkingSpaceFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ParkingSpace>, u64), DbErr> {
        let mut query = entity::prelude::ParkingSpace::find()
            .filter(entity::parking_space::Column::OrganizationId.eq(organization_id));

        if let Some(building_id) = filter.building_id {
            query = query.filter(entity::parking_space::Column::BuildingId.eq(building_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::parking_space::Column::Status.eq(status.to_string()));
        }

        let paginator = query
            .order_by_asc(entity::parking_space::Column::BuildingId)
            .order_by_asc(entity::parking_space::Column::SpaceNumber)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let spaces = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(ParkingSpace::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((spaces, total))
    }

    pub async fn update(
        &self,
        params: UpdateParkingSpaceParams,
    ) -> Result<Option<ParkingSpace>, DbErr> {
        let Some(space) = entity::prelude::ParkingSpace::find_by_id(params.id)
            .filter(entity::parking_space::Column::OrganizationId.eq(params.organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::parking_space::ActiveModel = space.into();
        active_model.space_number = ActiveValue::Set(params.space_number);
        active_model.space_type = ActiveValue::Set(params.space_type.to_string());
        active_model.status = ActiveValue::Set(params.status.to_string());

        let entity = active_model.update(self.db).await?;

        ParkingSpace::from_entity(entity).map(Some)
    }

    pub async fn set_status(&self, id: i32, status: ParkingSpaceStatus) -> Result<(), DbErr> {
        entity::prelude::ParkingSpace::update_many()
            .filter(entity::parking_space::Column::Id.eq(id))
            .col_expr(
                entity::parking_space::Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ParkingSpace::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count_by_building(&self, building_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ParkingSpace::find()
            .filter(entity::parking_space::Column::BuildingId.eq(building_id))
            .count(self.db)
            .await
    }

    /// Counts spaces of an organization, optionally with a given status.
    pub async fn count(
        &self,
        organization_id: i32,
        status: Option<ParkingSpaceStatus>,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::ParkingSpace::find()
            .filter(entity::parking_space::Column::OrganizationId.eq(organization_id));

        if let Some(status) = status {
            query = query.filter(entity::parking_space::Column::Status.eq(status.to_string()));
        }

        query.count(self.db).await
    }
}
