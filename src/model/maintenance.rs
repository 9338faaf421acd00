//! Complaint and work order DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintDto {
    pub id: i32,
    pub tenant_id: i32,
    pub unit_id: Option<i32>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateComplaintDto {
    pub tenant_id: i32,
    pub unit_id: Option<i32>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateComplaintStatusDto {
    pub status: ComplaintStatus,
    /// Required when resolving.
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintFilterParams {
    pub status: Option<ComplaintStatus>,
    pub tenant_id: Option<i32>,
    pub priority: Option<Priority>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkOrderDto {
    pub id: i32,
    pub building_id: i32,
    pub unit_id: Option<i32>,
    pub complaint_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub assigned_to: Option<i32>,
    pub estimated_cost: Option<i64>,
    pub actual_cost: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWorkOrderDto {
    pub building_id: i32,
    pub unit_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_cost: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Converts a complaint into a work order in the given building.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConvertComplaintDto {
    pub building_id: i32,
    pub estimated_cost: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignWorkOrderDto {
    pub user_id: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateWorkOrderStatusDto {
    pub status: WorkOrderStatus,
    pub actual_cost: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkOrderFilterParams {
    pub status: Option<WorkOrderStatus>,
    pub building_id: Option<i32>,
    pub assigned_to: Option<i32>,
}
