//! Organization management for platform super admins.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{organization::OrganizationStatus, user::UserRole},
    server::{
        data::{organization::OrganizationRepository, user::UserRepository},
        error::AppError,
        model::{
            organization::{
                is_valid_slug, CreateOrganizationParams, Organization, UpdateOrganizationParams,
            },
            page::Page,
            user::{CreateUserParams, User},
        },
        util::{
            normalize::normalize_phone,
            password::{hash_password, validate_password},
        },
    },
};

pub struct OrganizationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an organization together with its first org admin.
    ///
    /// # Returns
    /// - `Ok((Organization, User))` - Created organization and admin
    /// - `Err(AppError::BadRequest)` - Invalid slug, name, phone or password
    /// - `Err(AppError::Conflict)` - Slug already taken
    pub async fn create(
        &self,
        mut params: CreateOrganizationParams,
    ) -> Result<(Organization, User), AppError> {
        params.slug = params.slug.to_lowercase();
        if !is_valid_slug(&params.slug) {
            return Err(AppError::BadRequest(
                "Slug may only contain lowercase letters, digits and dashes".to_string(),
            ));
        }
        if params.name.is_empty() || params.admin_name.is_empty() {
            return Err(AppError::BadRequest(
                "Organization and admin names are required".to_string(),
            ));
        }
        let admin_phone = normalize_phone(&params.admin_phone);
        if admin_phone.is_empty() {
            return Err(AppError::BadRequest("Admin phone is required".to_string()));
        }
        validate_password(&params.admin_password)?;

        if OrganizationRepository::new(self.db)
            .find_by_slug(&params.slug)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Slug '{}' is already in use",
                params.slug
            )));
        }

        let password_hash = hash_password(&params.admin_password)?;

        let txn = self.db.begin().await?;

        let organization = OrganizationRepository::new(&txn).create(&params).await?;
        let admin = UserRepository::new(&txn)
            .create(
                &CreateUserParams {
                    organization_id: Some(organization.id),
                    name: params.admin_name,
                    phone: admin_phone,
                    email: params.contact_email,
                    password: params.admin_password,
                    role: UserRole::OrgAdmin,
                },
                password_hash,
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Created organization {} ({}) with admin {}",
            organization.id,
            organization.slug,
            admin.id
        );

        Ok((organization, admin))
    }

    pub async fn get(&self, id: i32) -> Result<Organization, AppError> {
        OrganizationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(&self, page: u64, per_page: u64) -> Result<Page<Organization>, AppError> {
        let result = OrganizationRepository::new(self.db)
            .get_paginated(page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    pub async fn update(&self, params: UpdateOrganizationParams) -> Result<Organization, AppError> {
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }

        let id = params.id;
        OrganizationRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Activates or suspends an organization. Suspended organizations cannot log in.
    pub async fn set_status(
        &self,
        id: i32,
        status: OrganizationStatus,
    ) -> Result<Organization, AppError> {
        let organization = OrganizationRepository::new(self.db)
            .set_status(id, status)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Organization {} is now {}", id, status);

        Ok(organization)
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Organization {} not found", id))
}
