use std::collections::HashSet;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::parking::{ParkingSpaceStatus, ParkingSpaceType},
    server::{
        data::{
            building::BuildingRepository,
            parking::{assignment::ParkingAssignmentRepository, space::ParkingSpaceRepository},
        },
        error::AppError,
        model::{
            page::Page,
            parking::{
                CreateParkingSpaceParams, ParkingSpace, ParkingSpaceFilter,
                UpdateParkingSpaceParams,
            },
        },
    },
};

pub struct ParkingSpaceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParkingSpaceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateParkingSpaceParams) -> Result<ParkingSpace, AppError> {
        let mut created = self
            .create_many(
                params.organization_id,
                params.building_id,
                params.space_type,
                vec![params.space_number],
            )
            .await?;

        created.pop().ok_or_else(|| {
            AppError::InternalError("Parking space insert returned no rows".to_string())
        })
    }

    /// Creates spaces of one type in a building, all or nothing.
    ///
    /// Space numbers must be unique within the building, including inside the batch.
    pub async fn create_many(
        &self,
        organization_id: i32,
        building_id: i32,
        space_type: ParkingSpaceType,
        space_numbers: Vec<String>,
    ) -> Result<Vec<ParkingSpace>, AppError> {
        if space_numbers.is_empty() {
            return Err(AppError::BadRequest(
                "No parking spaces to create".to_string(),
            ));
        }

        BuildingRepository::new(self.db)
            .find_in_organization(organization_id, building_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Building {} not found", building_id)))?;

        let mut taken: HashSet<String> = ParkingSpaceRepository::new(self.db)
            .existing_numbers(building_id, None)
            .await?
            .into_iter()
            .collect();

        let mut numbers = Vec::with_capacity(space_numbers.len());
        for number in space_numbers {
            let number = number.trim().to_string();
            if number.is_empty() {
                return Err(AppError::BadRequest(
                    "Space number is required".to_string(),
                ));
            }
            if !taken.insert(number.clone()) {
                return Err(AppError::Conflict(format!(
                    "Space number {} already exists in building {}",
                    number, building_id
                )));
            }
            numbers.push(number);
        }

        let txn = self.db.begin().await?;
        let repo = ParkingSpaceRepository::new(&txn);

        let mut created = Vec::with_capacity(numbers.len());
        for space_number in numbers {
            created.push(
                repo.create(CreateParkingSpaceParams {
                    organization_id,
                    building_id,
                    space_number,
                    space_type,
                })
                .await?,
            );
        }

        txn.commit().await?;

        tracing::info!(
            "Created {} parking spaces in building {}",
            created.len(),
            building_id
        );

        Ok(created)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<ParkingSpace, AppError> {
        ParkingSpaceRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ParkingSpaceFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<ParkingSpace>, AppError> {
        let result = ParkingSpaceRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Updates a space. `occupied` follows assignments and cannot be set or cleared here.
    pub async fn update(&self, mut params: UpdateParkingSpaceParams) -> Result<ParkingSpace, AppError> {
        params.space_number = params.space_number.trim().to_string();
        if params.space_number.is_empty() {
            return Err(AppError::BadRequest("Space number is required".to_string()));
        }

        let repo = ParkingSpaceRepository::new(self.db);
        let space = repo
            .find_in_organization(params.organization_id, params.id)
            .await?
            .ok_or_else(|| not_found(params.id))?;

        if params.status != space.status
            && (params.status == ParkingSpaceStatus::Occupied
                || space.status == ParkingSpaceStatus::Occupied)
        {
            return Err(AppError::Conflict(
                "Occupancy is managed through parking assignments".to_string(),
            ));
        }

        if repo
            .existing_numbers(space.building_id, Some(space.id))
            .await?
            .contains(&params.space_number)
        {
            return Err(AppError::Conflict(format!(
                "Space number {} already exists in building {}",
                params.space_number, space.building_id
            )));
        }

        let id = params.id;
        repo.update(params).await?.ok_or_else(|| not_found(id))
    }

    /// Deletes a space that is free and has never been assigned.
    pub async fn delete(&self, organization_id: i32, id: i32) -> Result<(), AppError> {
        let repo = ParkingSpaceRepository::new(self.db);
        let space = repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if space.status == ParkingSpaceStatus::Occupied {
            return Err(AppError::Conflict(format!(
                "Parking space {} is occupied",
                space.space_number
            )));
        }
        if ParkingAssignmentRepository::new(self.db)
            .exists_for_space(space.id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Parking space {} has assignment history and cannot be deleted",
                space.space_number
            )));
        }

        repo.delete(space.id).await?;

        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Parking space {} not found", id))
}
