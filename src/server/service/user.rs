//! Staff accounts inside an organization.
//!
//! Phones are unique per organization after normalization, and every organization keeps at
//! least one active org admin.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::{UserRole, UserStatus},
    server::{
        data::user::UserRepository,
        error::AppError,
        model::{
            page::Page,
            user::{CreateUserParams, UpdateUserParams, User},
        },
        util::{
            normalize::normalize_phone,
            password::{hash_password, validate_password},
        },
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a staff account in the caller's organization.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user
    /// - `Err(AppError::BadRequest)` - Missing name/phone, weak password or super admin role
    /// - `Err(AppError::Conflict)` - Phone already used in the organization
    pub async fn create(&self, mut params: CreateUserParams) -> Result<User, AppError> {
        if params.role == UserRole::SuperAdmin {
            return Err(AppError::BadRequest(
                "Super admins cannot be created inside an organization".to_string(),
            ));
        }
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        params.phone = normalize_phone(&params.phone);
        if params.phone.is_empty() {
            return Err(AppError::BadRequest("Phone is required".to_string()));
        }
        validate_password(&params.password)?;

        let repo = UserRepository::new(self.db);
        if repo
            .phone_exists(params.organization_id, &params.phone, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Phone {} is already registered in this organization",
                params.phone
            )));
        }

        let password_hash = hash_password(&params.password)?;
        let user = repo.create(&params, password_hash).await?;

        tracing::info!("Created user {} with role {}", user.id, user.role);

        Ok(user)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        role: Option<UserRole>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<User>, AppError> {
        let result = UserRepository::new(self.db)
            .get_paginated(organization_id, role, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Updates name, email, role and status.
    ///
    /// Demoting or deactivating the last active org admin is rejected.
    pub async fn update(&self, params: UpdateUserParams) -> Result<User, AppError> {
        if params.role == UserRole::SuperAdmin {
            return Err(AppError::BadRequest(
                "Super admin role cannot be assigned".to_string(),
            ));
        }
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }

        let repo = UserRepository::new(self.db);
        let existing = repo
            .find_in_organization(params.organization_id, params.id)
            .await?
            .ok_or_else(|| not_found(params.id))?;

        let stays_active_admin =
            params.role == UserRole::OrgAdmin && params.status == UserStatus::Active;
        if existing.is_active_org_admin() && !stays_active_admin {
            self.ensure_not_last_admin(params.organization_id).await?;
        }

        let id = params.id;
        repo.update(params).await?.ok_or_else(|| not_found(id))
    }

    pub async fn change_password(
        &self,
        organization_id: i32,
        id: i32,
        password: &str,
    ) -> Result<(), AppError> {
        validate_password(password)?;

        let repo = UserRepository::new(self.db);
        let user = repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        repo.update_password(user.id, hash_password(password)?)
            .await?;

        tracing::info!("Password changed for user {}", user.id);

        Ok(())
    }

    /// Deletes a user. Users cannot delete themselves or the last active org admin.
    pub async fn delete(&self, actor_id: i32, organization_id: i32, id: i32) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);
        let user = repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if user.is_active_org_admin() {
            self.ensure_not_last_admin(organization_id).await?;
        }

        repo.delete(user.id).await?;

        tracing::info!("User {} deleted by {}", user.id, actor_id);

        Ok(())
    }

    async fn ensure_not_last_admin(&self, organization_id: i32) -> Result<(), AppError> {
        let admins = UserRepository::new(self.db)
            .count_active_org_admins(organization_id)
            .await?;

        if admins <= 1 {
            return Err(AppError::Conflict(
                "The organization must keep at least one active org admin".to_string(),
            ));
        }

        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}
