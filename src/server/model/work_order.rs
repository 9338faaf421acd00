use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::maintenance::{CreateWorkOrderDto, Priority, WorkOrderDto, WorkOrderStatus},
    server::util::parse::parse_enum,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrder {
    pub id: i32,
    pub organization_id: i32,
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

impl WorkOrder {
    pub fn from_entity(entity: entity::work_order::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            building_id: entity.building_id,
            unit_id: entity.unit_id,
            complaint_id: entity.complaint_id,
            title: entity.title,
            description: entity.description,
            priority: parse_enum("work_order.priority", &entity.priority)?,
            status: parse_enum("work_order.status", &entity.status)?,
            assigned_to: entity.assigned_to,
            estimated_cost: entity.estimated_cost,
            actual_cost: entity.actual_cost,
            due_date: entity.due_date,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        })
    }

    pub fn into_dto(self) -> WorkOrderDto {
        WorkOrderDto {
            id: self.id,
            building_id: self.building_id,
            unit_id: self.unit_id,
            complaint_id: self.complaint_id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            assigned_to: self.assigned_to,
            estimated_cost: self.estimated_cost,
            actual_cost: self.actual_cost,
            due_date: self.due_date,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Whether a work order may move from `from` to `to`.
///
/// Reassigning an assigned order is allowed; completed and cancelled orders are final.
pub fn work_order_transition_allowed(from: WorkOrderStatus, to: WorkOrderStatus) -> bool {
    use WorkOrderStatus::*;

    matches!(
        (from, to),
        (Open, Assigned | Cancelled)
            | (Assigned, Assigned | InProgress | Cancelled)
            | (InProgress, Completed | Cancelled)
    )
}

#[derive(Debug, Clone)]
pub struct CreateWorkOrderParams {
    pub organization_id: i32,
    pub building_id: i32,
    pub unit_id: Option<i32>,
    pub complaint_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_cost: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

impl CreateWorkOrderParams {
    pub fn from_dto(organization_id: i32, dto: CreateWorkOrderDto) -> Self {
        Self {
            organization_id,
            building_id: dto.building_id,
            unit_id: dto.unit_id,
            complaint_id: None,
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            priority: dto.priority,
            estimated_cost: dto.estimated_cost,
            due_date: dto.due_date,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkOrderFilter {
    pub status: Option<WorkOrderStatus>,
    pub building_id: Option<i32>,
    pub assigned_to: Option<i32>,
}
