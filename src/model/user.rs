use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    OrgAdmin,
    PropertyManager,
    Accountant,
    Security,
    Maintenance,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub organization_id: Option<i32>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserDto {
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginDto {
    /// Organization slug. Omitted for platform super admins.
    pub organization: Option<String>,
    pub phone: String,
    pub password: String,
}

/// Redeems the one-time startup code to create the first super admin.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BootstrapDto {
    pub code: String,
    pub name: String,
    pub phone: String,
    pub password: String,
}
