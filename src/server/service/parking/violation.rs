use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::parking::ViolationStatus,
    server::{
        data::parking::{space::ParkingSpaceRepository, violation::ParkingViolationRepository},
        error::AppError,
        model::{
            page::Page,
            parking::{CreateParkingViolationParams, ParkingViolation, ParkingViolationFilter},
        },
        util::normalize::normalize_plate,
    },
};

pub struct ParkingViolationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParkingViolationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn issue(
        &self,
        mut params: CreateParkingViolationParams,
    ) -> Result<ParkingViolation, AppError> {
        params.vehicle_plate = normalize_plate(&params.vehicle_plate);
        if params.vehicle_plate.is_empty() {
            return Err(AppError::BadRequest("Vehicle plate is required".to_string()));
        }
        if params.fine_amount < 0 {
            return Err(AppError::BadRequest("Fine cannot be negative".to_string()));
        }

        if let Some(space_id) = params.space_id {
            ParkingSpaceRepository::new(self.db)
                .find_in_organization(params.organization_id, space_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Parking space {} not found", space_id))
                })?;
        }

        let violation = ParkingViolationRepository::new(self.db)
            .create(params)
            .await?;

        tracing::info!(
            "Issued {} violation {} to {}",
            violation.violation_type,
            violation.id,
            violation.vehicle_plate
        );

        Ok(violation)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<ParkingViolation, AppError> {
        ParkingViolationRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        mut filter: ParkingViolationFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<ParkingViolation>, AppError> {
        filter.vehicle_plate = filter
            .vehicle_plate
            .map(|plate| normalize_plate(&plate))
            .filter(|plate| !plate.is_empty());

        let result = ParkingViolationRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Closes an open violation as paid or dismissed.
    pub async fn resolve(
        &self,
        organization_id: i32,
        id: i32,
        status: ViolationStatus,
        now: DateTime<Utc>,
    ) -> Result<ParkingViolation, AppError> {
        if status == ViolationStatus::Open {
            return Err(AppError::BadRequest(
                "A violation is resolved as paid or dismissed".to_string(),
            ));
        }

        let violation = self.get(organization_id, id).await?;
        if violation.status != ViolationStatus::Open {
            return Err(AppError::Conflict(format!(
                "Violation {} is already {}",
                violation.id, violation.status
            )));
        }

        ParkingViolationRepository::new(self.db)
            .resolve(violation.id, status, now)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Parking violation {} not found", id))
}
