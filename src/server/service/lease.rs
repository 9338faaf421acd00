//! Lease lifecycle. A unit is `occupied` exactly while it has an active lease.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{property::UnitStatus, tenant::LeaseStatus},
    server::{
        data::{lease::LeaseRepository, tenant::TenantRepository, unit::UnitRepository},
        error::AppError,
        model::{
            lease::{CreateLeaseParams, Lease, LeaseFilter},
            page::Page,
        },
    },
};

pub struct LeaseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active lease and marks the unit occupied.
    ///
    /// # Returns
    /// - `Ok(Lease)` - Created lease
    /// - `Err(AppError::NotFound)` - Tenant or unit not in the organization
    /// - `Err(AppError::BadRequest)` - Invalid dates or amounts
    /// - `Err(AppError::Conflict)` - Unit occupied, under maintenance or already leased
    pub async fn create(&self, params: CreateLeaseParams) -> Result<Lease, AppError> {
        if params.end_date <= params.start_date {
            return Err(AppError::BadRequest(
                "Lease end date must be after the start date".to_string(),
            ));
        }
        if params.deposit < 0 {
            return Err(AppError::BadRequest(
                "Deposit cannot be negative".to_string(),
            ));
        }

        TenantRepository::new(self.db)
            .find_in_organization(params.organization_id, params.tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Tenant {} not found", params.tenant_id))
            })?;
        let unit = UnitRepository::new(self.db)
            .find_in_organization(params.organization_id, params.unit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Unit {} not found", params.unit_id)))?;

        match unit.status {
            UnitStatus::Occupied => {
                return Err(AppError::Conflict(format!(
                    "Unit {} is already occupied",
                    unit.id
                )))
            }
            UnitStatus::Maintenance => {
                return Err(AppError::Conflict(format!(
                    "Unit {} is under maintenance",
                    unit.id
                )))
            }
            UnitStatus::Vacant => {}
        }

        if LeaseRepository::new(self.db)
            .find_active_for_unit(unit.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Unit {} already has an active lease",
                unit.id
            )));
        }

        let monthly_rent = params.monthly_rent.unwrap_or(unit.monthly_rent);
        if monthly_rent <= 0 {
            return Err(AppError::BadRequest(
                "Monthly rent must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let lease = LeaseRepository::new(&txn)
            .create(&params, monthly_rent)
            .await?;
        UnitRepository::new(&txn)
            .set_status(unit.id, UnitStatus::Occupied)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Created lease {} for tenant {} on unit {}",
            lease.id,
            lease.tenant_id,
            lease.unit_id
        );

        Ok(lease)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Lease, AppError> {
        LeaseRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: LeaseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Lease>, AppError> {
        let result = LeaseRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Terminates an active lease early and frees its unit.
    ///
    /// The termination date must fall inside the lease term.
    pub async fn terminate(
        &self,
        organization_id: i32,
        id: i32,
        termination_date: NaiveDate,
    ) -> Result<Lease, AppError> {
        let lease = LeaseRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if lease.status != LeaseStatus::Active {
            return Err(AppError::Conflict(format!(
                "Lease {} is already {}",
                lease.id, lease.status
            )));
        }
        if termination_date < lease.start_date || termination_date > lease.end_date {
            return Err(AppError::BadRequest(format!(
                "Termination date must be between {} and {}",
                lease.start_date, lease.end_date
            )));
        }

        let txn = self.db.begin().await?;

        let terminated = LeaseRepository::new(&txn)
            .close(lease.id, LeaseStatus::Terminated, Some(termination_date))
            .await?
            .ok_or_else(|| not_found(id))?;
        UnitRepository::new(&txn)
            .set_status(lease.unit_id, UnitStatus::Vacant)
            .await?;

        txn.commit().await?;

        tracing::info!("Terminated lease {} on {}", lease.id, termination_date);

        Ok(terminated)
    }

    /// Expires active leases of every organization whose end date is before `today`.
    ///
    /// Returns the number of leases expired.
    pub async fn expire_leases(&self, today: NaiveDate) -> Result<u64, AppError> {
        let expired = LeaseRepository::new(self.db)
            .get_expired_active(today)
            .await?;
        if expired.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let lease_repo = LeaseRepository::new(&txn);
        let unit_repo = UnitRepository::new(&txn);

        for lease in &expired {
            lease_repo
                .close(lease.id, LeaseStatus::Expired, None)
                .await?;
            unit_repo.set_status(lease.unit_id, UnitStatus::Vacant).await?;
        }

        txn.commit().await?;

        tracing::info!("Expired {} leases ending before {}", expired.len(), today);

        Ok(expired.len() as u64)
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Lease {} not found", id))
}
