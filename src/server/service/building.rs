use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        building::BuildingRepository, parking::space::ParkingSpaceRepository,
        unit::UnitRepository, visitor_log::VisitorLogRepository,
        work_order::WorkOrderRepository,
    },
    error::AppError,
    model::{
        building::{Building, BuildingParams},
        page::Page,
    },
};

pub struct BuildingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BuildingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: BuildingParams) -> Result<Building, AppError> {
        validate(&params)?;

        let building = BuildingRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Created building {} in organization {}",
            building.id,
            building.organization_id
        );

        Ok(building)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Building, AppError> {
        BuildingRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Building>, AppError> {
        let result = BuildingRepository::new(self.db)
            .get_paginated(organization_id, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    pub async fn update(&self, id: i32, params: BuildingParams) -> Result<Building, AppError> {
        validate(&params)?;

        BuildingRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes an empty building. Units and parking spaces must be removed first.
    pub async fn delete(&self, organization_id: i32, id: i32) -> Result<(), AppError> {
        let repo = BuildingRepository::new(self.db);
        let building = repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let units = UnitRepository::new(self.db)
            .count_by_building(building.id)
            .await?;
        let spaces = ParkingSpaceRepository::new(self.db)
            .count_by_building(building.id)
            .await?;
        if units > 0 || spaces > 0 {
            return Err(AppError::Conflict(format!(
                "Building {} still has {} units and {} parking spaces",
                building.id, units, spaces
            )));
        }
        if VisitorLogRepository::new(self.db)
            .exists_for_building(building.id)
            .await?
            || WorkOrderRepository::new(self.db)
                .exists_for_building(building.id)
                .await?
        {
            return Err(AppError::Conflict(format!(
                "Building {} has visitor or work order history and cannot be deleted",
                building.id
            )));
        }

        repo.delete(building.id).await?;

        Ok(())
    }
}

fn validate(params: &BuildingParams) -> Result<(), AppError> {
    if params.name.is_empty() {
        return Err(AppError::BadRequest("Building name is required".to_string()));
    }
    if params.floors < 1 {
        return Err(AppError::BadRequest(
            "A building has at least one floor".to_string(),
        ));
    }

    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Building {} not found", id))
}
