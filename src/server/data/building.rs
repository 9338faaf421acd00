use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::building::{Building, BuildingParams};

pub struct BuildingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BuildingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: BuildingParams) -> Result<Building, DbErr> {
        let entity = entity::building::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            name: ActiveValue::Set(params.name),
            address: ActiveValue::Set(params.address),
            floors: ActiveValue::Set(params.floors),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Building::from_entity(entity))
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Building>, DbErr> {
        Ok(entity::prelude::Building::find_by_id(id)
            .filter(entity::building::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(Building::from_entity))
    }

    /// Gets buildings of an organization ordered by name.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Building>, u64), DbErr> {
        let paginator = entity::prelude::Building::find()
            .filter(entity::building::Column::OrganizationId.eq(organization_id))
            .order_by_asc(entity::building::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let buildings = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Building::from_entity)
            .collect();

        Ok((buildings, total))
    }

    pub async fn update(&self, id: i32, params: BuildingParams) -> Result<Option<Building>, DbErr> {
        let Some(building) = entity::prelude::Building::find_by_id(id)
            .filter(entity::building::Column::OrganizationId.eq(params.organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::building::ActiveModel = building.into();
        active_model.name = ActiveValue::Set(params.name);
        active_model.address = ActiveValue::Set(params.address);
        active_model.floors = ActiveValue::Set(params.floors);

        let entity = active_model.update(self.db).await?;

        Ok(Some(Building::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Building::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Building::find()
            .filter(entity::building::Column::OrganizationId.eq(organization_id))
            .count(self.db)
            .await
    }
}
