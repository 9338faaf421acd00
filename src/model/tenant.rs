use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TenantDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TenantInputDto {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub status: Option<TenantStatus>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TenantFilterParams {
    pub status: Option<TenantStatus>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaseStatus {
    Active,
    Terminated,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaseDto {
    pub id: i32,
    pub tenant_id: i32,
    pub unit_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: i64,
    pub deposit: i64,
    pub status: LeaseStatus,
    pub terminated_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLeaseDto {
    pub tenant_id: i32,
    pub unit_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Defaults to the unit's listed rent.
    pub monthly_rent: Option<i64>,
    #[serde(default)]
    pub deposit: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TerminateLeaseDto {
    pub termination_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaseFilterParams {
    pub status: Option<LeaseStatus>,
    pub tenant_id: Option<i32>,
    pub unit_id: Option<i32>,
}
