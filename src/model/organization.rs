use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrganizationStatus {
    Active,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub status: OrganizationStatus,
    pub created_at: DateTime<Utc>,
}

/// Creates an organization together with its first org admin.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrganizationDto {
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub admin_name: String,
    pub admin_phone: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrganizationDto {
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetOrganizationStatusDto {
    pub status: OrganizationStatus,
}
