//! Parking domain models and the parking charge calculation.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;

use crate::{
    model::parking::{
        ParkingAssignmentDto, ParkingAssignmentStatus, ParkingAssignmentType,
        ParkingPricingDto, ParkingSpaceDto, ParkingSpaceStatus, ParkingSpaceType,
        ParkingViolationDto, ViolationStatus, ViolationType,
    },
    server::util::parse::parse_enum,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSpace {
    pub id: i32,
    pub organization_id: i32,
    pub building_id: i32,
    pub space_number: String,
    pub space_type: ParkingSpaceType,
    pub status: ParkingSpaceStatus,
    pub created_at: DateTime<Utc>,
}

impl ParkingSpace {
    pub fn from_entity(entity: entity::parking_space::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            building_id: entity.building_id,
            space_number: entity.space_number,
            space_type: parse_enum("parking_space.space_type", &entity.space_type)?,
            status: parse_enum("parking_space.status", &entity.status)?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ParkingSpaceDto {
        ParkingSpaceDto {
            id: self.id,
            building_id: self.building_id,
            space_number: self.space_number,
            space_type: self.space_type,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateParkingSpaceParams {
    pub organization_id: i32,
    pub building_id: i32,
    pub space_number: String,
    pub space_type: ParkingSpaceType,
}

#[derive(Debug, Clone)]
pub struct UpdateParkingSpaceParams {
    pub id: i32,
    pub organization_id: i32,
    pub space_number: String,
    pub space_type: ParkingSpaceType,
    pub status: ParkingSpaceStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ParkingSpaceFilter {
    pub building_id: Option<i32>,
    pub status: Option<ParkingSpaceStatus>,
}

/// Rates for one space type. Only one pricing per type is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingPricing {
    pub id: i32,
    pub organization_id: i32,
    pub space_type: ParkingSpaceType,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    pub monthly_rate: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl ParkingPricing {
    pub fn from_entity(entity: entity::parking_pricing::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            space_type: parse_enum("parking_pricing.space_type", &entity.space_type)?,
            hourly_rate: entity.hourly_rate,
            daily_rate: entity.daily_rate,
            monthly_rate: entity.monthly_rate,
            active: entity.active,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ParkingPricingDto {
        ParkingPricingDto {
            id: self.id,
            space_type: self.space_type,
            hourly_rate: self.hourly_rate,
            daily_rate: self.daily_rate,
            monthly_rate: self.monthly_rate,
            active: self.active,
            created_at: self.created_at,
        }
    }

    pub fn rate_for(&self, assignment_type: ParkingAssignmentType) -> i64 {
        match assignment_type {
            ParkingAssignmentType::Hourly => self.hourly_rate,
            ParkingAssignmentType::Daily => self.daily_rate,
            ParkingAssignmentType::Monthly => self.monthly_rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SetParkingPricingParams {
    pub organization_id: i32,
    pub space_type: ParkingSpaceType,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    pub monthly_rate: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingAssignment {
    pub id: i32,
    pub organization_id: i32,
    pub space_id: i32,
    pub tenant_id: Option<i32>,
    pub vehicle_plate: String,
    pub assignment_type: ParkingAssignmentType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: ParkingAssignmentStatus,
    pub amount_charged: Option<i64>,
    pub invoice_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ParkingAssignment {
    pub fn from_entity(entity: entity::parking_assignment::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            space_id: entity.space_id,
            tenant_id: entity.tenant_id,
            vehicle_plate: entity.vehicle_plate,
            assignment_type: parse_enum(
                "parking_assignment.assignment_type",
                &entity.assignment_type,
            )?,
            start_time: entity.start_time,
            end_time: entity.end_time,
            status: parse_enum("parking_assignment.status", &entity.status)?,
            amount_charged: entity.amount_charged,
            invoice_id: entity.invoice_id,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ParkingAssignmentDto {
        ParkingAssignmentDto {
            id: self.id,
            space_id: self.space_id,
            tenant_id: self.tenant_id,
            vehicle_plate: self.vehicle_plate,
            assignment_type: self.assignment_type,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
            amount_charged: self.amount_charged,
            invoice_id: self.invoice_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateParkingAssignmentParams {
    pub organization_id: i32,
    pub space_id: i32,
    pub tenant_id: Option<i32>,
    pub vehicle_plate: String,
    pub assignment_type: ParkingAssignmentType,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ParkingAssignmentFilter {
    pub status: Option<ParkingAssignmentStatus>,
    pub space_id: Option<i32>,
    pub tenant_id: Option<i32>,
}

/// Result of pricing a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkingCharge {
    /// Whole billing periods, never less than one.
    pub units: i64,
    pub rate: i64,
    pub amount: i64,
}

/// Length of one billing period for an assignment type. A month is 30 days.
pub fn billing_period(assignment_type: ParkingAssignmentType) -> Duration {
    match assignment_type {
        ParkingAssignmentType::Hourly => Duration::hours(1),
        ParkingAssignmentType::Daily => Duration::hours(24),
        ParkingAssignmentType::Monthly => Duration::days(30),
    }
}

/// Prices a stay from `start` to `end`.
///
/// Any started period is billed in full and every stay is billed at least one period.
/// Returns `None` when `end` is before `start` or the amount overflows.
pub fn calculate_charge(
    assignment_type: ParkingAssignmentType,
    rate: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<ParkingCharge> {
    if end < start {
        return None;
    }

    let elapsed = (end - start).num_seconds();
    let period = billing_period(assignment_type).num_seconds();
    let units = ((elapsed + period - 1) / period).max(1);

    Some(ParkingCharge {
        units,
        rate,
        amount: units.checked_mul(rate)?,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingViolation {
    pub id: i32,
    pub organization_id: i32,
    pub space_id: Option<i32>,
    pub vehicle_plate: String,
    pub violation_type: ViolationType,
    pub fine_amount: i64,
    pub status: ViolationStatus,
    pub notes: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ParkingViolation {
    pub fn from_entity(entity: entity::parking_violation::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            space_id: entity.space_id,
            vehicle_plate: entity.vehicle_plate,
            violation_type: parse_enum(
                "parking_violation.violation_type",
                &entity.violation_type,
            )?,
            fine_amount: entity.fine_amount,
            status: parse_enum("parking_violation.status", &entity.status)?,
            notes: entity.notes,
            issued_at: entity.issued_at,
            resolved_at: entity.resolved_at,
        })
    }

    pub fn into_dto(self) -> ParkingViolationDto {
        ParkingViolationDto {
            id: self.id,
            space_id: self.space_id,
            vehicle_plate: self.vehicle_plate,
            violation_type: self.violation_type,
            fine_amount: self.fine_amount,
            status: self.status,
            notes: self.notes,
            issued_at: self.issued_at,
            resolved_at: self.resolved_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateParkingViolationParams {
    pub organization_id: i32,
    pub space_id: Option<i32>,
    pub vehicle_plate: String,
    pub violation_type: ViolationType,
    pub fine_amount: i64,
    pub notes: Option<String>,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ParkingViolationFilter {
    pub status: Option<ViolationStatus>,
    pub vehicle_plate: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn partial_hours_round_up() {
        let charge =
            calculate_charge(ParkingAssignmentType::Hourly, 5_000, at(8, 0), at(10, 1)).unwrap();

        assert_eq!(charge.units, 3);
        assert_eq!(charge.amount, 15_000);
    }

    #[test]
    fn exact_hours_are_not_rounded() {
        let charge =
            calculate_charge(ParkingAssignmentType::Hourly, 5_000, at(8, 0), at(10, 0)).unwrap();

        assert_eq!(charge.units, 2);
    }

    #[test]
    fn zero_length_stay_bills_one_period() {
        let charge =
            calculate_charge(ParkingAssignmentType::Daily, 50_000, at(8, 0), at(8, 0)).unwrap();

        assert_eq!(charge.units, 1);
        assert_eq!(charge.amount, 50_000);
    }

    #[test]
    fn daily_rounds_up_past_twenty_four_hours() {
        let start = at(8, 0);
        let end = start + Duration::hours(25);
        let charge = calculate_charge(ParkingAssignmentType::Daily, 50_000, start, end).unwrap();

        assert_eq!(charge.units, 2);
    }

    #[test]
    fn monthly_uses_thirty_day_periods() {
        let start = at(8, 0);
        let charge = calculate_charge(
            ParkingAssignmentType::Monthly,
            600_000,
            start,
            start + Duration::days(31),
        )
        .unwrap();

        assert_eq!(charge.units, 2);
        assert_eq!(charge.amount, 1_200_000);
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(calculate_charge(ParkingAssignmentType::Hourly, 5_000, at(9, 0), at(8, 0)).is_none());
    }

    #[test]
    fn overflowing_charge_is_rejected() {
        assert!(calculate_charge(ParkingAssignmentType::Hourly, i64::MAX, at(8, 0), at(10, 0)).is_none());
    }
}
