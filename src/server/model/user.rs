//! User domain models and parameters.
//!
//! Staff accounts belong to one organization; super admins have none. Roles map to a fixed
//! permission set, see `middleware::auth::Permission`.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::user::{CreateUserDto, UpdateUserDto, UserDto, UserRole, UserStatus},
    server::util::{normalize::optional_text, parse::parse_enum},
};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// `None` only for platform super admins.
    pub organization_id: Option<i32>,
    pub name: String,
    /// Normalized phone number, unique within the organization.
    pub phone: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO, dropping the password hash.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            organization_id: self.organization_id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            role: self.role,
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(DbErr::Custom)` - Stored role or status is not a known value
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            password_hash: entity.password_hash,
            role: parse_enum("user.role", &entity.role)?,
            status: parse_enum("user.status", &entity.status)?,
            created_at: entity.created_at,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Whether this user counts towards the organization's active admins.
    pub fn is_active_org_admin(&self) -> bool {
        self.role == UserRole::OrgAdmin && self.is_active()
    }
}

/// Parameters for creating a user. The phone is normalized by the service.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub organization_id: Option<i32>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: String,
    pub role: UserRole,
}

impl CreateUserParams {
    pub fn from_dto(organization_id: i32, dto: CreateUserDto) -> Self {
        Self {
            organization_id: Some(organization_id),
            name: dto.name.trim().to_string(),
            phone: dto.phone,
            email: optional_text(dto.email),
            password: dto.password,
            role: dto.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
}

impl UpdateUserParams {
    pub fn from_dto(organization_id: i32, id: i32, dto: UpdateUserDto) -> Self {
        Self {
            id,
            organization_id,
            name: dto.name.trim().to_string(),
            email: optional_text(dto.email),
            role: dto.role,
            status: dto.status,
        }
    }
}
