use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::tenant::{CreateLeaseDto, LeaseDto, LeaseStatus},
    server::util::parse::parse_enum,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Lease {
    pub id: i32,
    pub organization_id: i32,
    pub tenant_id: i32,
    pub unit_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: i64,
    pub deposit: i64,
    pub status: LeaseStatus,
    pub terminated_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Lease {
    pub fn from_entity(entity: entity::lease::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            tenant_id: entity.tenant_id,
            unit_id: entity.unit_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            monthly_rent: entity.monthly_rent,
            deposit: entity.deposit,
            status: parse_enum("lease.status", &entity.status)?,
            terminated_at: entity.terminated_at,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> LeaseDto {
        LeaseDto {
            id: self.id,
            tenant_id: self.tenant_id,
            unit_id: self.unit_id,
            start_date: self.start_date,
            end_date: self.end_date,
            monthly_rent: self.monthly_rent,
            deposit: self.deposit,
            status: self.status,
            terminated_at: self.terminated_at,
            created_at: self.created_at,
        }
    }

    /// Whether any day of `[first, last]` falls inside the lease term.
    pub fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start_date <= last && self.end_date >= first
    }
}

#[derive(Debug, Clone)]
pub struct CreateLeaseParams {
    pub organization_id: i32,
    pub tenant_id: i32,
    pub unit_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `None` falls back to the unit's listed rent.
    pub monthly_rent: Option<i64>,
    pub deposit: i64,
}

impl CreateLeaseParams {
    pub fn from_dto(organization_id: i32, dto: CreateLeaseDto) -> Self {
        Self {
            organization_id,
            tenant_id: dto.tenant_id,
            unit_id: dto.unit_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            monthly_rent: dto.monthly_rent,
            deposit: dto.deposit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeaseFilter {
    pub status: Option<LeaseStatus>,
    pub tenant_id: Option<i32>,
    pub unit_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lease(start: NaiveDate, end: NaiveDate) -> Lease {
        Lease {
            id: 1,
            organization_id: 1,
            tenant_id: 1,
            unit_id: 1,
            start_date: start,
            end_date: end,
            monthly_rent: 100,
            deposit: 0,
            status: LeaseStatus::Active,
            terminated_at: None,
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overlap_includes_partial_months() {
        let lease = lease(date(2026, 3, 15), date(2026, 6, 10));

        assert!(lease.overlaps(date(2026, 3, 1), date(2026, 3, 31)));
        assert!(lease.overlaps(date(2026, 6, 1), date(2026, 6, 30)));
        assert!(!lease.overlaps(date(2026, 2, 1), date(2026, 2, 28)));
        assert!(!lease.overlaps(date(2026, 7, 1), date(2026, 7, 31)));
    }
}
