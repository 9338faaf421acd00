use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::tenant::{TenantDto, TenantInputDto, TenantStatus},
    server::util::{normalize::optional_text, parse::parse_enum},
};

/// A building resident billed for rent and parking.
#[derive(Debug, Clone, PartialEq)]
pub struct Tenant {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn from_entity(entity: entity::tenant::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            national_id: entity.national_id,
            status: parse_enum("tenant.status", &entity.status)?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> TenantDto {
        TenantDto {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            national_id: self.national_id,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Fields shared by tenant create and update. The phone is normalized by the service.
#[derive(Debug, Clone)]
pub struct TenantParams {
    pub organization_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub status: TenantStatus,
}

impl TenantParams {
    pub fn from_dto(organization_id: i32, dto: TenantInputDto) -> Self {
        Self {
            organization_id,
            name: dto.name.trim().to_string(),
            phone: dto.phone,
            email: optional_text(dto.email),
            national_id: optional_text(dto.national_id),
            status: dto.status.unwrap_or(TenantStatus::Active),
        }
    }
}
