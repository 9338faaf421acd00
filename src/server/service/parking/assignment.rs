//! Parking assignments and their charges.
//!
//! A space holds at most one active assignment and is `occupied` while it does. Ending an
//! hourly or daily stay of a known tenant bills it on a new invoice; monthly stays are
//! billed by monthly invoice generation instead.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        billing::InvoiceItemCategory,
        parking::{ParkingAssignmentStatus, ParkingAssignmentType, ParkingSpaceStatus},
    },
    server::{
        data::{
            parking::{
                assignment::ParkingAssignmentRepository, pricing::ParkingPricingRepository,
                space::ParkingSpaceRepository,
            },
            tenant::TenantRepository,
        },
        error::AppError,
        model::{
            invoice::{derive_status, CreateInvoiceParams, InvoiceItemParams},
            page::Page,
            parking::{
                calculate_charge, CreateParkingAssignmentParams, ParkingAssignment,
                ParkingAssignmentFilter, ParkingCharge, ParkingPricing, ParkingSpace,
            },
        },
        service::invoice::insert_numbered,
        util::normalize::normalize_plate,
    },
};

pub struct ParkingAssignmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParkingAssignmentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns an available space to a vehicle and marks it occupied.
    ///
    /// # Returns
    /// - `Ok(ParkingAssignment)` - Active assignment
    /// - `Err(AppError::NotFound)` - Space or tenant not in the organization
    /// - `Err(AppError::BadRequest)` - Missing plate, no pricing, or monthly without tenant
    /// - `Err(AppError::Conflict)` - Space not available
    pub async fn create(
        &self,
        mut params: CreateParkingAssignmentParams,
    ) -> Result<ParkingAssignment, AppError> {
        params.vehicle_plate = normalize_plate(&params.vehicle_plate);
        if params.vehicle_plate.is_empty() {
            return Err(AppError::BadRequest("Vehicle plate is required".to_string()));
        }
        if params.assignment_type == ParkingAssignmentType::Monthly && params.tenant_id.is_none()
        {
            return Err(AppError::BadRequest(
                "Monthly parking requires a tenant".to_string(),
            ));
        }

        let space = ParkingSpaceRepository::new(self.db)
            .find_in_organization(params.organization_id, params.space_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Parking space {} not found", params.space_id))
            })?;

        if let Some(tenant_id) = params.tenant_id {
            TenantRepository::new(self.db)
                .find_in_organization(params.organization_id, tenant_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", tenant_id)))?;
        }

        if space.status != ParkingSpaceStatus::Available {
            return Err(AppError::Conflict(format!(
                "Parking space {} is {}",
                space.space_number, space.status
            )));
        }
        if ParkingAssignmentRepository::new(self.db)
            .find_active_for_space(space.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Parking space {} already has an active assignment",
                space.space_number
            )));
        }

        self.active_pricing(&space).await?;

        let txn = self.db.begin().await?;
        let assignment = ParkingAssignmentRepository::new(&txn).create(params).await?;
        ParkingSpaceRepository::new(&txn)
            .set_status(space.id, ParkingSpaceStatus::Occupied)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Assigned parking space {} to {} ({})",
            space.space_number,
            assignment.vehicle_plate,
            assignment.assignment_type
        );

        Ok(assignment)
    }

    /// Ends an active assignment, charges it and frees the space.
    ///
    /// Hourly and daily stays of a tenant are invoiced right away, due `due_days` after
    /// `today`.
    pub async fn end(
        &self,
        organization_id: i32,
        id: i32,
        end_time: DateTime<Utc>,
        due_days: i64,
        today: NaiveDate,
    ) -> Result<ParkingAssignment, AppError> {
        let assignment = self.get(organization_id, id).await?;
        if assignment.status != ParkingAssignmentStatus::Active {
            return Err(AppError::Conflict(format!(
                "Parking assignment {} is {}",
                assignment.id, assignment.status
            )));
        }

        let space = self.space_of(&assignment).await?;
        let pricing = self.active_pricing(&space).await?;
        let charge = charge_for(&assignment, &pricing, end_time)?;
        let quantity = i32::try_from(charge.units)
            .map_err(|_| AppError::BadRequest("Parking stay is too long to invoice".to_string()))?;

        let txn = self.db.begin().await?;

        let invoice_id = match (assignment.tenant_id, assignment.assignment_type) {
            (Some(tenant_id), ParkingAssignmentType::Hourly | ParkingAssignmentType::Daily) => {
                let due_date = today + Duration::days(due_days.max(0));
                let item = InvoiceItemParams {
                    category: InvoiceItemCategory::Parking,
                    description: format!(
                        "{} parking space {} for {}",
                        assignment.assignment_type, space.space_number, assignment.vehicle_plate
                    ),
                    quantity,
                    unit_price: charge.rate,
                    parking_assignment_id: Some(assignment.id),
                };
                let invoice = insert_numbered(
                    &txn,
                    CreateInvoiceParams {
                        organization_id,
                        tenant_id,
                        lease_id: None,
                        invoice_number: String::new(),
                        billing_period: None,
                        issue_date: today,
                        due_date,
                        status: derive_status(charge.amount, 0, due_date, today),
                        notes: None,
                        items: vec![item],
                    },
                )
                .await?;
                Some(invoice.id)
            }
            _ => None,
        };

        let completed = ParkingAssignmentRepository::new(&txn)
            .complete(assignment.id, end_time, charge.amount, invoice_id)
            .await?
            .ok_or_else(|| not_found(id))?;
        ParkingSpaceRepository::new(&txn)
            .set_status(space.id, ParkingSpaceStatus::Available)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Ended parking assignment {} with charge {}",
            completed.id,
            charge.amount
        );

        Ok(completed)
    }

    /// Charge of an active assignment if it ended at `as_of`.
    pub async fn estimate(
        &self,
        organization_id: i32,
        id: i32,
        as_of: DateTime<Utc>,
    ) -> Result<ParkingCharge, AppError> {
        let assignment = self.get(organization_id, id).await?;
        if assignment.status != ParkingAssignmentStatus::Active {
            return Err(AppError::Conflict(format!(
                "Parking assignment {} is {}",
                assignment.id, assignment.status
            )));
        }

        let space = self.space_of(&assignment).await?;
        let pricing = self.active_pricing(&space).await?;

        charge_for(&assignment, &pricing, as_of)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<ParkingAssignment, AppError> {
        ParkingAssignmentRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ParkingAssignmentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<ParkingAssignment>, AppError> {
        let result = ParkingAssignmentRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    async fn space_of(&self, assignment: &ParkingAssignment) -> Result<ParkingSpace, AppError> {
        ParkingSpaceRepository::new(self.db)
            .find_in_organization(assignment.organization_id, assignment.space_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Parking space {} not found", assignment.space_id))
            })
    }

    async fn active_pricing(&self, space: &ParkingSpace) -> Result<ParkingPricing, AppError> {
        ParkingPricingRepository::new(self.db)
            .find_active(space.organization_id, space.space_type)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "No active parking pricing for {} spaces",
                    space.space_type
                ))
            })
    }
}

fn charge_for(
    assignment: &ParkingAssignment,
    pricing: &ParkingPricing,
    end: DateTime<Utc>,
) -> Result<ParkingCharge, AppError> {
    if end < assignment.start_time {
        return Err(AppError::BadRequest(
            "End time cannot be before the start time".to_string(),
        ));
    }

    calculate_charge(
        assignment.assignment_type,
        pricing.rate_for(assignment.assignment_type),
        assignment.start_time,
        end,
    )
    .ok_or_else(|| AppError::BadRequest("Parking charge is too large".to_string()))
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Parking assignment {} not found", id))
}
