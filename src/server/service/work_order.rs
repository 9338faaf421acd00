use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        maintenance::{ComplaintStatus, WorkOrderStatus},
        user::UserStatus,
    },
    server::{
        data::{
            building::BuildingRepository, complaint::ComplaintRepository, unit::UnitRepository,
            user::UserRepository, work_order::WorkOrderRepository,
        },
        error::AppError,
        model::{
            complaint::ComplaintStatusChange,
            page::Page,
            work_order::{
                work_order_transition_allowed, CreateWorkOrderParams, WorkOrder, WorkOrderFilter,
            },
        },
    },
};

pub struct WorkOrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkOrderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateWorkOrderParams) -> Result<WorkOrder, AppError> {
        if params.title.is_empty() {
            return Err(AppError::BadRequest("Work order title is required".to_string()));
        }
        if params.estimated_cost.is_some_and(|cost| cost < 0) {
            return Err(AppError::BadRequest(
                "Estimated cost cannot be negative".to_string(),
            ));
        }

        BuildingRepository::new(self.db)
            .find_in_organization(params.organization_id, params.building_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Building {} not found", params.building_id))
            })?;

        if let Some(unit_id) = params.unit_id {
            let unit = UnitRepository::new(self.db)
                .find_in_organization(params.organization_id, unit_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Unit {} not found", unit_id)))?;
            if unit.building_id != params.building_id {
                return Err(AppError::BadRequest(format!(
                    "Unit {} is not in building {}",
                    unit.unit_number, params.building_id
                )));
            }
        }

        let work_order = WorkOrderRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Opened work order {} in building {}",
            work_order.id,
            work_order.building_id
        );

        Ok(work_order)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<WorkOrder, AppError> {
        WorkOrderRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: WorkOrderFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<WorkOrder>, AppError> {
        let result = WorkOrderRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Assigns a work order to an active user of the same organization.
    ///
    /// An already assigned order can be reassigned until work starts.
    pub async fn assign(
        &self,
        organization_id: i32,
        id: i32,
        user_id: i32,
    ) -> Result<WorkOrder, AppError> {
        let work_order = self.get(organization_id, id).await?;
        ensure_transition(&work_order, WorkOrderStatus::Assigned)?;

        let user = UserRepository::new(self.db)
            .find_in_organization(organization_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        if user.status != UserStatus::Active {
            return Err(AppError::BadRequest(format!(
                "User {} is not active",
                user.name
            )));
        }

        let assigned = WorkOrderRepository::new(self.db)
            .assign(work_order.id, user.id)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Assigned work order {} to user {}", assigned.id, user.id);

        Ok(assigned)
    }

    /// Moves a work order along its lifecycle.
    ///
    /// Completing an order created from a complaint resolves that complaint unless it was
    /// already resolved or closed.
    pub async fn update_status(
        &self,
        organization_id: i32,
        id: i32,
        status: WorkOrderStatus,
        actual_cost: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<WorkOrder, AppError> {
        if status == WorkOrderStatus::Assigned {
            return Err(AppError::BadRequest(
                "Use assignment to assign a work order".to_string(),
            ));
        }
        if actual_cost.is_some_and(|cost| cost < 0) {
            return Err(AppError::BadRequest("Actual cost cannot be negative".to_string()));
        }

        let work_order = self.get(organization_id, id).await?;
        ensure_transition(&work_order, status)?;

        let completed_at = (status == WorkOrderStatus::Completed).then_some(now);

        let complaint = match (status, work_order.complaint_id) {
            (WorkOrderStatus::Completed, Some(complaint_id)) => ComplaintRepository::new(self.db)
                .find_in_organization(organization_id, complaint_id)
                .await?
                .filter(|c| {
                    !matches!(c.status, ComplaintStatus::Resolved | ComplaintStatus::Closed)
                }),
            _ => None,
        };

        let txn = self.db.begin().await?;

        let updated = WorkOrderRepository::new(&txn)
            .update_status(work_order.id, status, actual_cost, completed_at)
            .await?
            .ok_or_else(|| not_found(id))?;

        if let Some(complaint) = &complaint {
            ComplaintRepository::new(&txn)
                .update_status(
                    complaint.id,
                    ComplaintStatusChange {
                        status: ComplaintStatus::Resolved,
                        resolution: Some(format!("Resolved by work order {}", updated.id)),
                        resolved_at: Some(now),
                    },
                )
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Work order {} moved from {} to {}",
            updated.id,
            work_order.status,
            updated.status
        );
        if let Some(complaint) = complaint {
            tracing::info!(
                "Resolved complaint {} with work order {}",
                complaint.id,
                updated.id
            );
        }

        Ok(updated)
    }
}

fn ensure_transition(work_order: &WorkOrder, to: WorkOrderStatus) -> Result<(), AppError> {
    if work_order_transition_allowed(work_order.status, to) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Work order {} cannot move from {} to {}",
            work_order.id, work_order.status, to
        )))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Work order {} not found", id))
}
