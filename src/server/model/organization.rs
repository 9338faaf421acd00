//! Organization domain model and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::organization::{
        CreateOrganizationDto, OrganizationDto, OrganizationStatus, UpdateOrganizationDto,
    },
    server::util::{normalize::optional_text, parse::parse_enum},
};

/// A customer of the platform; every other record is scoped to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    /// Globally unique login identifier, `[a-z0-9-]+`.
    pub slug: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub status: OrganizationStatus,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn from_entity(entity: entity::organization::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            contact_email: entity.contact_email,
            contact_phone: entity.contact_phone,
            status: parse_enum("organization.status", &entity.status)?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> OrganizationDto {
        OrganizationDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            status: self.status,
            created_at: self.created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == OrganizationStatus::Active
    }
}

/// Parameters for creating an organization and its first org admin.
#[derive(Debug, Clone)]
pub struct CreateOrganizationParams {
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub admin_name: String,
    pub admin_phone: String,
    pub admin_password: String,
}

impl CreateOrganizationParams {
    pub fn from_dto(dto: CreateOrganizationDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            contact_email: optional_text(dto.contact_email),
            contact_phone: optional_text(dto.contact_phone),
            admin_name: dto.admin_name.trim().to_string(),
            admin_phone: dto.admin_phone,
            admin_password: dto.admin_password,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOrganizationParams {
    pub id: i32,
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl UpdateOrganizationParams {
    pub fn from_dto(id: i32, dto: UpdateOrganizationDto) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            contact_email: optional_text(dto.contact_email),
            contact_phone: optional_text(dto.contact_phone),
        }
    }
}

/// Returns true when the slug is non-empty and only contains `[a-z0-9-]`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_slugs() {
        assert!(is_valid_slug("acme-towers-2"));
        assert!(!is_valid_slug("Acme"));
        assert!(!is_valid_slug("acme towers"));
        assert!(!is_valid_slug(""));
    }
}
