use sea_orm::DatabaseConnection;

use crate::{
    model::tenant::TenantStatus,
    server::{
        data::{
            complaint::ComplaintRepository, invoice::InvoiceRepository, lease::LeaseRepository,
            tenant::TenantRepository,
        },
        error::AppError,
        model::{
            page::Page,
            tenant::{Tenant, TenantParams},
        },
        util::normalize::normalize_phone,
    },
};

pub struct TenantService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TenantService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a tenant. The phone must be unique within the organization.
    pub async fn create(&self, params: TenantParams) -> Result<Tenant, AppError> {
        let params = self.validate(params, None).await?;

        let tenant = TenantRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Created tenant {} in organization {}",
            tenant.id,
            tenant.organization_id
        );

        Ok(tenant)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Tenant, AppError> {
        TenantRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        status: Option<TenantStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Tenant>, AppError> {
        let result = TenantRepository::new(self.db)
            .get_paginated(organization_id, status, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    pub async fn update(&self, id: i32, params: TenantParams) -> Result<Tenant, AppError> {
        let repo = TenantRepository::new(self.db);
        repo.find_in_organization(params.organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let params = self.validate(params, Some(id)).await?;

        repo.update(id, params).await?.ok_or_else(|| not_found(id))
    }

    /// Deletes a tenant without lease or billing history.
    pub async fn delete(&self, organization_id: i32, id: i32) -> Result<(), AppError> {
        let repo = TenantRepository::new(self.db);
        let tenant = repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if LeaseRepository::new(self.db)
            .exists_for_tenant(tenant.id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Tenant {} has leases and cannot be deleted",
                tenant.id
            )));
        }
        if InvoiceRepository::new(self.db)
            .exists_for_tenant(tenant.id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Tenant {} has invoices and cannot be deleted",
                tenant.id
            )));
        }
        if ComplaintRepository::new(self.db)
            .exists_for_tenant(tenant.id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Tenant {} has complaints and cannot be deleted",
                tenant.id
            )));
        }

        repo.delete(tenant.id).await?;

        tracing::info!("Deleted tenant {}", tenant.id);

        Ok(())
    }

    async fn validate(
        &self,
        mut params: TenantParams,
        exclude_id: Option<i32>,
    ) -> Result<TenantParams, AppError> {
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Tenant name is required".to_string()));
        }
        params.phone = normalize_phone(&params.phone);
        if params.phone.is_empty() {
            return Err(AppError::BadRequest("Tenant phone is required".to_string()));
        }

        if TenantRepository::new(self.db)
            .phone_exists(params.organization_id, &params.phone, exclude_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Phone {} is already registered to another tenant",
                params.phone
            )));
        }

        Ok(params)
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Tenant {} not found", id))
}
