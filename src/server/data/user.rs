//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing staff accounts. Phone numbers are
//! expected to be normalized by the caller; lookups compare them verbatim.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::user::{UserRole, UserStatus},
    server::model::user::{CreateUserParams, UpdateUserParams, User},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active user with an already hashed password.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique phone violation
    pub async fn create(
        &self,
        params: &CreateUserParams,
        password_hash: String,
    ) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            name: ActiveValue::Set(params.name.clone()),
            phone: ActiveValue::Set(params.phone.clone()),
            email: ActiveValue::Set(params.email.clone()),
            password_hash: ActiveValue::Set(password_hash),
            role: ActiveValue::Set(params.role.to_string()),
            status: ActiveValue::Set(UserStatus::Active.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by id regardless of organization.
    ///
    /// Used by the auth guard to resolve the session user.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a user by id within an organization.
    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<User>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .filter(entity::user::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a user by normalized phone.
    ///
    /// With an organization id the search is limited to that organization; without one it
    /// only matches platform super admins.
    pub async fn find_by_phone(
        &self,
        organization_id: Option<i32>,
        phone: &str,
    ) -> Result<Option<User>, DbErr> {
        let query = entity::prelude::User::find().filter(entity::user::Column::Phone.eq(phone));

        let query = match organization_id {
            Some(organization_id) => {
                query.filter(entity::user::Column::OrganizationId.eq(organization_id))
            }
            None => query
                .filter(entity::user::Column::OrganizationId.is_null())
                .filter(entity::user::Column::Role.eq(UserRole::SuperAdmin.to_string())),
        };

        query
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Checks whether another user of the organization already uses the phone.
    pub async fn phone_exists(
        &self,
        organization_id: Option<i32>,
        phone: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Phone.eq(phone));

        query = match organization_id {
            Some(organization_id) => {
                query.filter(entity::user::Column::OrganizationId.eq(organization_id))
            }
            None => query.filter(entity::user::Column::OrganizationId.is_null()),
        };

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets users of an organization ordered by name, optionally filtered by role.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        role: Option<UserRole>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::OrganizationId.eq(organization_id));

        if let Some(role) = role {
            query = query.filter(entity::user::Column::Role.eq(role.to_string()));
        }

        let paginator = query
            .order_by_asc(entity::user::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Updates profile, role and status. Returns `None` when the user isn't in the organization.
    pub async fn update(&self, params: UpdateUserParams) -> Result<Option<User>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(params.id)
            .filter(entity::user::Column::OrganizationId.eq(params.organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::user::ActiveModel = user.into();
        active_model.name = ActiveValue::Set(params.name);
        active_model.email = ActiveValue::Set(params.email);
        active_model.role = ActiveValue::Set(params.role.to_string());
        active_model.status = ActiveValue::Set(params.status.to_string());

        let entity = active_model.update(self.db).await?;

        User::from_entity(entity).map(Some)
    }

    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Counts active org admins of an organization.
    pub async fn count_active_org_admins(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::OrganizationId.eq(organization_id))
            .filter(entity::user::Column::Role.eq(UserRole::OrgAdmin.to_string()))
            .filter(entity::user::Column::Status.eq(UserStatus::Active.to_string()))
            .count(self.db)
            .await
    }

    /// Checks whether any platform super admin exists.
    pub async fn super_admin_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::SuperAdmin.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
