use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::property::UnitStatus,
    server::model::unit::{CreateUnitParams, Unit, UnitFilter, UpdateUnitParams},
};

pub struct UnitRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UnitRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a vacant unit.
    pub async fn create(&self, params: CreateUnitParams) -> Result<Unit, DbErr> {
        let entity = entity::unit::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            building_id: ActiveValue::Set(params.building_id),
            unit_number: ActiveValue::Set(params.unit_number),
            floor: ActiveValue::Set(params.floor),
            area_sqm: ActiveValue::Set(params.area_sqm),
            monthly_rent: ActiveValue::Set(params.monthly_rent),
            status: ActiveValue::Set(UnitStatus::Vacant.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Unit::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Unit>, DbErr> {
        entity::prelude::Unit::find_by_id(id)
            .filter(entity::unit::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(Unit::from_entity)
            .transpose()
    }

    /// Unit numbers already used in a building, optionally ignoring one unit.
    pub async fn existing_numbers(
        &self,
        building_id: i32,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>, DbErr> {
        let mut query = entity::prelude::Unit::find()
            .select_only()
            .column(entity::unit::Column::UnitNumber)
            .filter(entity::unit::Column::BuildingId.eq(building_id));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::unit::Column::Id.ne(exclude_id));
        }

        query.into_tuple::<String>().all(self.db).await
    }

    /// Gets units ordered by building then unit number.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: UnitFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Unit>, u64), DbErr> {
        let mut query = entity::prelude::Unit::find()
            .filter(entity::unit::Column::OrganizationId.eq(organization_id));

        if let Some(building_id) = filter.building_id {
            query = query.filter(entity::unit::Column::BuildingId.eq(building_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::unit::Column::Status.eq(status.to_string()));
        }

        let paginator = query
            .order_by_asc(entity::unit::Column::BuildingId)
            .order_by_asc(entity::unit::Column::UnitNumber)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let units = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Unit::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((units, total))
    }

    pub async fn update(&self, params: UpdateUnitParams) -> Result<Option<Unit>, DbErr> {
        let Some(unit) = entity::prelude::Unit::find_by_id(params.id)
            .filter(entity::unit::Column::OrganizationId.eq(params.organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::unit::ActiveModel = unit.into();
        active_model.unit_number = ActiveValue::Set(params.unit_number);
        active_model.floor = ActiveValue::Set(params.floor);
        active_model.area_sqm = ActiveValue::Set(params.area_sqm);
        active_model.monthly_rent = ActiveValue::Set(params.monthly_rent);
        active_model.status = ActiveValue::Set(params.status.to_string());

        let entity = active_model.update(self.db).await?;

        Unit::from_entity(entity).map(Some)
    }

    pub async fn set_status(&self, id: i32, status: UnitStatus) -> Result<(), DbErr> {
        entity::prelude::Unit::update_many()
            .filter(entity::unit::Column::Id.eq(id))
            .col_expr(
                entity::unit::Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Unit::delete_by_id(id).exec(self.db).await?;

        Ok(())
    }

    pub async fn count_by_building(&self, building_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Unit::find()
            .filter(entity::unit::Column::BuildingId.eq(building_id))
            .count(self.db)
            .await
    }

    /// Counts units of an organization, optionally with a given status.
    pub async fn count(
        &self,
        organization_id: i32,
        status: Option<UnitStatus>,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Unit::find()
            .filter(entity::unit::Column::OrganizationId.eq(organization_id));

        if let Some(status) = status {
            query = query.filter(entity::unit::Column::Status.eq(status.to_string()));
        }

        query.count(self.db).await
    }
}
