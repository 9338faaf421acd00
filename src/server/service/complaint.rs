use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::maintenance::ComplaintStatus,
    server::{
        data::{
            building::BuildingRepository, complaint::ComplaintRepository,
            tenant::TenantRepository, unit::UnitRepository, work_order::WorkOrderRepository,
        },
        error::AppError,
        model::{
            complaint::{
                complaint_transition_allowed, Complaint, ComplaintFilter, ComplaintStatusChange,
                CreateComplaintParams,
            },
            page::Page,
            work_order::{CreateWorkOrderParams, WorkOrder},
        },
        util::normalize::optional_text,
    },
};

pub struct ComplaintService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ComplaintService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a complaint for a tenant, optionally about one of the organization's units.
    pub async fn create(&self, params: CreateComplaintParams) -> Result<Complaint, AppError> {
        if params.title.is_empty() {
            return Err(AppError::BadRequest("Complaint title is required".to_string()));
        }
        if params.category.is_empty() {
            return Err(AppError::BadRequest(
                "Complaint category is required".to_string(),
            ));
        }

        TenantRepository::new(self.db)
            .find_in_organization(params.organization_id, params.tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", params.tenant_id)))?;

        if let Some(unit_id) = params.unit_id {
            UnitRepository::new(self.db)
                .find_in_organization(params.organization_id, unit_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Unit {} not found", unit_id)))?;
        }

        let complaint = ComplaintRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Complaint {} filed by tenant {} ({})",
            complaint.id,
            complaint.tenant_id,
            complaint.priority
        );

        Ok(complaint)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Complaint, AppError> {
        ComplaintRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ComplaintFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Complaint>, AppError> {
        let result = ComplaintRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Moves a complaint to a new status.
    ///
    /// # Returns
    /// - `Ok(Complaint)` - Updated complaint
    /// - `Err(AppError::BadRequest)` - Resolving without a resolution
    /// - `Err(AppError::Conflict)` - Transition not allowed from the current status
    pub async fn update_status(
        &self,
        organization_id: i32,
        id: i32,
        status: ComplaintStatus,
        resolution: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Complaint, AppError> {
        let complaint = self.get(organization_id, id).await?;
        ensure_transition(&complaint, status)?;

        let resolution = optional_text(resolution);
        let change = if status == ComplaintStatus::Resolved {
            let resolution = resolution.ok_or_else(|| {
                AppError::BadRequest("A resolution is required to resolve a complaint".to_string())
            })?;
            ComplaintStatusChange {
                status,
                resolution: Some(resolution),
                resolved_at: Some(now),
            }
        } else {
            ComplaintStatusChange {
                status,
                resolution,
                resolved_at: None,
            }
        };

        let updated = ComplaintRepository::new(self.db)
            .update_status(complaint.id, change)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(
            "Complaint {} moved from {} to {}",
            updated.id,
            complaint.status,
            updated.status
        );

        Ok(updated)
    }

    /// Opens a work order for a complaint in the given building and moves the complaint to
    /// `in_progress`.
    pub async fn convert_to_work_order(
        &self,
        organization_id: i32,
        id: i32,
        building_id: i32,
        estimated_cost: Option<i64>,
        due_date: Option<NaiveDate>,
    ) -> Result<WorkOrder, AppError> {
        let complaint = self.get(organization_id, id).await?;
        ensure_transition(&complaint, ComplaintStatus::InProgress)?;

        if estimated_cost.is_some_and(|cost| cost < 0) {
            return Err(AppError::BadRequest(
                "Estimated cost cannot be negative".to_string(),
            ));
        }

        BuildingRepository::new(self.db)
            .find_in_organization(organization_id, building_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Building {} not found", building_id)))?;

        let txn = self.db.begin().await?;

        let work_order = WorkOrderRepository::new(&txn)
            .create(CreateWorkOrderParams {
                organization_id,
                building_id,
                unit_id: complaint.unit_id,
                complaint_id: Some(complaint.id),
                title: complaint.title.clone(),
                description: complaint.description.clone(),
                priority: complaint.priority,
                estimated_cost,
                due_date,
            })
            .await?;

        ComplaintRepository::new(&txn)
            .update_status(
                complaint.id,
                ComplaintStatusChange {
                    status: ComplaintStatus::InProgress,
                    resolution: None,
                    resolved_at: None,
                },
            )
            .await?
            .ok_or_else(|| not_found(id))?;

        txn.commit().await?;

        tracing::info!(
            "Converted complaint {} to work order {}",
            complaint.id,
            work_order.id
        );

        Ok(work_order)
    }
}

fn ensure_transition(complaint: &Complaint, to: ComplaintStatus) -> Result<(), AppError> {
    if complaint_transition_allowed(complaint.status, to) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Complaint {} cannot move from {} to {}",
            complaint.id, complaint.status, to
        )))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Complaint {} not found", id))
}
