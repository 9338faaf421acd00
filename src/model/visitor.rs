use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisitStatus {
    CheckedIn,
    CheckedOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisitorLogDto {
    pub id: i32,
    pub building_id: i32,
    pub host_tenant_id: Option<i32>,
    pub visitor_name: String,
    pub visitor_phone: Option<String>,
    pub purpose: String,
    pub vehicle_plate: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: VisitStatus,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckInDto {
    pub building_id: i32,
    pub host_tenant_id: Option<i32>,
    pub visitor_name: String,
    pub visitor_phone: Option<String>,
    pub purpose: String,
    pub vehicle_plate: Option<String>,
    /// Defaults to now.
    pub check_in: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CheckOutDto {
    /// Defaults to now.
    pub check_out: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisitorLogFilterParams {
    pub building_id: Option<i32>,
    pub status: Option<VisitStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisitorAnalyticsParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub building_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountBucketDto {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisitorAnalyticsDto {
    pub total_visits: u64,
    pub currently_checked_in: u64,
    pub unique_visitors: u64,
    pub average_duration_minutes: Option<f64>,
    /// 24 buckets labelled `00`..`23`.
    pub by_hour: Vec<CountBucketDto>,
    /// Labelled `YYYY-MM`, ascending.
    pub by_month: Vec<CountBucketDto>,
    /// Descending by count.
    pub by_purpose: Vec<CountBucketDto>,
}
