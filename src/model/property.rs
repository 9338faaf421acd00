use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BuildingDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub floors: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BuildingInputDto {
    pub name: String,
    pub address: String,
    pub floors: i32,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnitStatus {
    Vacant,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UnitDto {
    pub id: i32,
    pub building_id: i32,
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
    pub status: UnitStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUnitDto {
    pub building_id: i32,
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkCreateUnitsDto {
    pub building_id: i32,
    pub units: Vec<BulkUnitDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkUnitDto {
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
}

/// Status can only be toggled between vacant and maintenance; occupancy follows leases.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUnitDto {
    pub unit_number: String,
    pub floor: i32,
    pub area_sqm: Option<i32>,
    pub monthly_rent: i64,
    pub status: UnitStatus,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnitFilterParams {
    pub building_id: Option<i32>,
    pub status: Option<UnitStatus>,
}
