use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParkingSpaceType {
    Standard,
    Compact,
    Handicap,
    Ev,
    Motorcycle,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParkingSpaceStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParkingSpaceDto {
    pub id: i32,
    pub building_id: i32,
    pub space_number: String,
    pub space_type: ParkingSpaceType,
    pub status: ParkingSpaceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateParkingSpaceDto {
    pub building_id: i32,
    pub space_number: String,
    pub space_type: ParkingSpaceType,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkCreateParkingSpacesDto {
    pub building_id: i32,
    pub space_type: ParkingSpaceType,
    pub space_numbers: Vec<String>,
}

/// `occupied` is managed by assignments and cannot be set directly.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateParkingSpaceDto {
    pub space_number: String,
    pub space_type: ParkingSpaceType,
    pub status: ParkingSpaceStatus,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParkingSpaceFilterParams {
    pub building_id: Option<i32>,
    pub status: Option<ParkingSpaceStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParkingPricingDto {
    pub id: i32,
    pub space_type: ParkingSpaceType,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    pub monthly_rate: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetParkingPricingDto {
    pub space_type: ParkingSpaceType,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    pub monthly_rate: i64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParkingAssignmentType {
    Hourly,
    Daily,
    Monthly,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParkingAssignmentStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParkingAssignmentDto {
    pub id: i32,
    pub space_id: i32,
    pub tenant_id: Option<i32>,
    pub vehicle_plate: String,
    pub assignment_type: ParkingAssignmentType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: ParkingAssignmentStatus,
    pub amount_charged: Option<i64>,
    pub invoice_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateParkingAssignmentDto {
    pub space_id: i32,
    pub tenant_id: Option<i32>,
    pub vehicle_plate: String,
    pub assignment_type: ParkingAssignmentType,
    /// Defaults to now.
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EndParkingAssignmentDto {
    /// Defaults to now.
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParkingChargeEstimateDto {
    pub assignment_id: i32,
    pub billable_units: i64,
    pub rate: i64,
    pub amount: i64,
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParkingAssignmentFilterParams {
    pub status: Option<ParkingAssignmentStatus>,
    pub space_id: Option<i32>,
    pub tenant_id: Option<i32>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViolationType {
    Unauthorized,
    Overstay,
    WrongSpace,
    NoPermit,
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViolationStatus {
    Open,
    Paid,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParkingViolationDto {
    pub id: i32,
    pub space_id: Option<i32>,
    pub vehicle_plate: String,
    pub violation_type: ViolationType,
    pub fine_amount: i64,
    pub status: ViolationStatus,
    pub notes: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateParkingViolationDto {
    pub space_id: Option<i32>,
    pub vehicle_plate: String,
    pub violation_type: ViolationType,
    pub fine_amount: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResolveParkingViolationDto {
    pub status: ViolationStatus,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParkingViolationFilterParams {
    pub status: Option<ViolationStatus>,
    pub vehicle_plate: Option<String>,
}
