use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::parking::pricing::ParkingPricingRepository,
    error::AppError,
    model::parking::{ParkingPricing, SetParkingPricingParams},
};

pub struct ParkingPricingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParkingPricingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the rates for a space type, deactivating the previous pricing.
    ///
    /// Old pricings are kept for reference; only the newest is active.
    pub async fn set(&self, params: SetParkingPricingParams) -> Result<ParkingPricing, AppError> {
        if params.hourly_rate < 0 || params.daily_rate < 0 || params.monthly_rate < 0 {
            return Err(AppError::BadRequest(
                "Parking rates cannot be negative".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let pricing = ParkingPricingRepository::new(&txn).replace(params).await?;
        txn.commit().await?;

        tracing::info!(
            "Set {} parking pricing for organization {}",
            pricing.space_type,
            pricing.organization_id
        );

        Ok(pricing)
    }

    pub async fn get_all(
        &self,
        organization_id: i32,
        active_only: bool,
    ) -> Result<Vec<ParkingPricing>, AppError> {
        Ok(ParkingPricingRepository::new(self.db)
            .get_all(organization_id, active_only)
            .await?)
    }
}
