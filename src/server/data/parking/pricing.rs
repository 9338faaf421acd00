use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    model::parking::ParkingSpaceType,
    server::model::parking::{ParkingPricing, SetParkingPricingParams},
};

pub struct ParkingPricingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ParkingPricingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Deactivates the current pricing of the space type and inserts the new active one.
    ///
    /// Run inside a transaction so a space type never has two active pricings.
    pub async fn replace(&self, params: SetParkingPricingParams) -> Result<ParkingPricing, DbErr> {
        entity::prelude::ParkingPricing::update_many()
            .filter(entity::parking_pricing::Column::OrganizationId.eq(params.organization_id))
            .filter(entity::parking_pricing::Column::SpaceType.eq(params.space_type.to_string()))
            .filter(entity::parking_pricing::Column::Active.eq(true))
            .col_expr(
                entity::parking_pricing::Column::Active,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        let entity = entity::parking_pricing::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            space_type: ActiveValue::Set(params.space_type.to_string()),
            hourly_rate: ActiveValue::Set(params.hourly_rate),
            daily_rate: ActiveValue::Set(params.daily_rate),
            monthly_rate: ActiveValue::Set(params.monthly_rate),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ParkingPricing::from_entity(entity)
    }

    pub async fn find_active(
        &self,
        organization_id: i32,
        space_type: ParkingSpaceType,
    ) -> Result<Option<ParkingPricing>, DbErr> {
        entity::prelude::ParkingPricing::find()
            .filter(entity::parking_pricing::Column::OrganizationId.eq(organization_id))
            .filter(entity::parking_pricing::Column::SpaceType.eq(space_type.to_string()))
            .filter(entity::parking_pricing::Column::Active.eq(true))
            .one(self.db)
            .await?
            .map(ParkingPricing::from_entity)
            .transpose()
    }

    /// Gets every pricing of the organization, active ones first, newest first.
    pub async fn get_all(
        &self,
        organization_id: i32,
        active_only: bool,
    ) -> Result<Vec<ParkingPricing>, DbErr> {
        let mut query = entity::prelude::ParkingPricing::find()
            .filter(entity::parking_pricing::Column::OrganizationId.eq(organization_id));

        if active_only {
            query = query.filter(entity::parking_pricing::Column::Active.eq(true));
        }

        query
            .order_by_desc(entity::parking_pricing::Column::Active)
            .order_by_desc(entity::parking_pricing::Column::CreatedAt)
            .order_by_desc(entity::parking_pricing::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ParkingPricing::from_entity)
            .collect()
    }
}
