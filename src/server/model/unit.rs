use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::property::{BulkUnitDto, CreateUnitDto, UnitDto, UnitStatus, UpdateUnitDto},
    server::util::parse::parse_enum,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i32,
    pub organization_id: i32,
    pub building_id: i32,
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
    /// `occupied` is set and cleared by lease operations only.
    pub status: UnitStatus,
    pub created_at: DateTime<Utc>,
}

impl Unit {
    pub fn from_entity(entity: entity::unit::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            building_id: entity.building_id,
            unit_number: entity.unit_number,
            floor: entity.floor,
            area_sqm: entity.area_sqm,
            monthly_rent: entity.monthly_rent,
            status: parse_enum("unit.status", &entity.status)?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> UnitDto {
        UnitDto {
            id: self.id,
            building_id: self.building_id,
            unit_number: self.unit_number,
            floor: self.floor,
            area_sqm: self.area_sqm,
            monthly_rent: self.monthly_rent,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// A unit to insert. Bulk creation validates the whole batch before any insert.
#[derive(Debug, Clone)]
pub struct CreateUnitParams {
    pub organization_id: i32,
    pub building_id: i32,
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
}

impl CreateUnitParams {
    pub fn from_dto(organization_id: i32, dto: CreateUnitDto) -> Self {
        Self {
            organization_id,
            building_id: dto.building_id,
            unit_number: dto.unit_number.trim().to_string(),
            floor: dto.floor,
            area_sqm: dto.area_sqm,
            monthly_rent: dto.monthly_rent,
        }
    }

    pub fn from_bulk_dto(organization_id: i32, building_id: i32, dto: BulkUnitDto) -> Self {
        Self {
            organization_id,
            building_id,
            unit_number: dto.unit_number.trim().to_string(),
            floor: dto.floor,
            area_sqm: dto.area_sqm,
            monthly_rent: dto.monthly_rent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUnitParams {
    pub id: i32,
    pub organization_id: i32,
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
    pub status: UnitStatus,
}

impl UpdateUnitParams {
    pub fn from_dto(organization_id: i32, id: i32, dto: UpdateUnitDto) -> Self {
        Self {
            id,
            organization_id,
            unit_number: dto.unit_number.trim().to_string(),
            floor: dto.floor,
            area_sqm: dto.area_sqm,
            monthly_rent: dto.monthly_rent,
            status: dto.status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    pub building_id: Option<i32>,
    pub status: Option<UnitStatus>,
}
