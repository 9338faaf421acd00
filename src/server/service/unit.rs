//! Units inside buildings. Unit numbers are unique per building.

use std::collections::HashSet;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::property::UnitStatus,
    server::{
        data::{building::BuildingRepository, lease::LeaseRepository, unit::UnitRepository},
        error::AppError,
        model::{
            page::Page,
            unit::{CreateUnitParams, Unit, UnitFilter, UpdateUnitParams},
        },
    },
};

pub struct UnitService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UnitService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateUnitParams) -> Result<Unit, AppError> {
        let mut created = self.create_many(params.building_id, vec![params]).await?;

        created
            .pop()
            .ok_or_else(|| AppError::InternalError("Unit insert returned no rows".to_string()))
    }

    /// Creates several units in one building, all or nothing.
    ///
    /// Every row is validated, including duplicates inside the batch and against existing
    /// units, before anything is inserted.
    pub async fn create_many(
        &self,
        building_id: i32,
        units: Vec<CreateUnitParams>,
    ) -> Result<Vec<Unit>, AppError> {
        let Some(first) = units.first() else {
            return Err(AppError::BadRequest("No units to create".to_string()));
        };
        let organization_id = first.organization_id;

        BuildingRepository::new(self.db)
            .find_in_organization(organization_id, building_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Building {} not found", building_id)))?;

        let mut taken: HashSet<String> = UnitRepository::new(self.db)
            .existing_numbers(building_id, None)
            .await?
            .into_iter()
            .collect();

        for unit in &units {
            validate_fields(&unit.unit_number, unit.monthly_rent, unit.area_sqm)?;
            if !taken.insert(unit.unit_number.clone()) {
                return Err(AppError::Conflict(format!(
                    "Unit number {} already exists in building {}",
                    unit.unit_number, building_id
                )));
            }
        }

        let txn = self.db.begin().await?;
        let repo = UnitRepository::new(&txn);

        let mut created = Vec::with_capacity(units.len());
        for unit in units {
            created.push(repo.create(CreateUnitParams { building_id, ..unit }).await?);
        }

        txn.commit().await?;

        tracing::info!("Created {} units in building {}", created.len(), building_id);

        Ok(created)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Unit, AppError> {
        UnitRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: UnitFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Unit>, AppError> {
        let result = UnitRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Updates a unit. Occupancy is driven by leases and cannot be set here.
    pub async fn update(&self, params: UpdateUnitParams) -> Result<Unit, AppError> {
        validate_fields(&params.unit_number, params.monthly_rent, params.area_sqm)?;

        let repo = UnitRepository::new(self.db);
        let unit = repo
            .find_in_organization(params.organization_id, params.id)
            .await?
            .ok_or_else(|| not_found(params.id))?;

        if params.status != unit.status
            && (params.status == UnitStatus::Occupied || unit.status == UnitStatus::Occupied)
        {
            return Err(AppError::Conflict(
                "Occupancy is managed through leases".to_string(),
            ));
        }

        let taken = repo
            .existing_numbers(unit.building_id, Some(unit.id))
            .await?;
        if taken.contains(&params.unit_number) {
            return Err(AppError::Conflict(format!(
                "Unit number {} already exists in building {}",
                params.unit_number, unit.building_id
            )));
        }

        let id = params.id;
        repo.update(params).await?.ok_or_else(|| not_found(id))
    }

    /// Deletes a unit that has never been leased.
    pub async fn delete(&self, organization_id: i32, id: i32) -> Result<(), AppError> {
        let repo = UnitRepository::new(self.db);
        let unit = repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let lease_repo = LeaseRepository::new(self.db);
        if lease_repo.find_active_for_unit(unit.id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Unit {} has an active lease",
                unit.id
            )));
        }
        if lease_repo.exists_for_unit(unit.id).await? {
            return Err(AppError::Conflict(format!(
                "Unit {} has lease history and cannot be deleted",
                unit.id
            )));
        }

        repo.delete(unit.id).await?;

        Ok(())
    }
}

fn validate_fields(unit_number: &str, monthly_rent: i64, area_sqm: Option<i32>) -> Result<(), AppError> {
    if unit_number.is_empty() {
        return Err(AppError::BadRequest("Unit number is required".to_string()));
    }
    if monthly_rent < 0 {
        return Err(AppError::BadRequest(
            "Monthly rent cannot be negative".to_string(),
        ));
    }
    if area_sqm.is_some_and(|area| area <= 0) {
        return Err(AppError::BadRequest("Area must be positive".to_string()));
    }

    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Unit {} not found", id))
}
