use chrono::{DateTime, Utc};

use crate::model::property::{BuildingDto, BuildingInputDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub address: String,
    pub floors: i32,
    pub created_at: DateTime<Utc>,
}

impl Building {
    pub fn from_entity(entity: entity::building::Model) -> Self {
        Self {
            id: entity.id,
            organization_id: entity.organization_id,
            name: entity.name,
            address: entity.address,
            floors: entity.floors,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> BuildingDto {
        BuildingDto {
            id: self.id,
            name: self.name,
            address: self.address,
            floors: self.floors,
            created_at: self.created_at,
        }
    }
}

/// Fields shared by building create and update.
#[derive(Debug, Clone)]
pub struct BuildingParams {
    pub organization_id: i32,
    pub name: String,
    pub address: String,
    pub floors: i32,
}

impl BuildingParams {
    pub fn from_dto(organization_id: i32, dto: BuildingInputDto) -> Self {
        Self {
            organization_id,
            name: dto.name.trim().to_string(),
            address: dto.address.trim().to_string(),
            floors: dto.floors,
        }
    }
}
