use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{billing::InvoiceStatus, parking::ParkingSpaceStatus, property::UnitStatus},
    server::{
        data::{
            building::BuildingRepository, complaint::ComplaintRepository,
            invoice::InvoiceRepository, lease::LeaseRepository,
            parking::space::ParkingSpaceRepository, payment::PaymentRepository,
            tenant::TenantRepository, unit::UnitRepository, visitor_log::VisitorLogRepository,
            work_order::WorkOrderRepository,
        },
        error::AppError,
        model::report::{Dashboard, RevenueReport},
        util::{period::BillingPeriod, stats::percentage},
    },
};

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Snapshot of an organization's properties, billing and operations as of `today`.
    pub async fn dashboard(
        &self,
        organization_id: i32,
        today: NaiveDate,
    ) -> Result<Dashboard, AppError> {
        let units = UnitRepository::new(self.db);
        let units_total = units.count(organization_id, None).await?;
        let units_occupied = units
            .count(organization_id, Some(UnitStatus::Occupied))
            .await?;
        let units_vacant = units.count(organization_id, Some(UnitStatus::Vacant)).await?;
        let units_maintenance = units
            .count(organization_id, Some(UnitStatus::Maintenance))
            .await?;

        let invoices = InvoiceRepository::new(self.db);
        let outstanding_amount = invoices.outstanding_amount(organization_id).await?;
        let overdue_invoices = invoices
            .count_with_status(organization_id, InvoiceStatus::Overdue)
            .await?;

        let month = BillingPeriod::containing(today);
        let (month_start, month_end) = day_range(month.first_day()?, month.last_day()?)?;
        let revenue_this_month = PaymentRepository::new(self.db)
            .get_completed_between(organization_id, month_start, month_end)
            .await?
            .iter()
            .map(|payment| payment.amount)
            .sum();

        let spaces = ParkingSpaceRepository::new(self.db);
        let parking_spaces_total = spaces.count(organization_id, None).await?;
        let parking_spaces_occupied = spaces
            .count(organization_id, Some(ParkingSpaceStatus::Occupied))
            .await?;

        let (day_start, day_end) = day_range(today, today)?;
        let visitors_today = VisitorLogRepository::new(self.db)
            .count_checked_in_between(organization_id, day_start, day_end)
            .await?;

        Ok(Dashboard {
            buildings: BuildingRepository::new(self.db).count(organization_id).await?,
            units_total,
            units_occupied,
            units_vacant,
            units_maintenance,
            occupancy_rate: percentage(units_occupied, units_total),
            active_leases: LeaseRepository::new(self.db)
                .count_active(organization_id)
                .await?,
            active_tenants: TenantRepository::new(self.db)
                .count_active(organization_id)
                .await?,
            outstanding_amount,
            overdue_invoices,
            revenue_this_month,
            open_complaints: ComplaintRepository::new(self.db)
                .count_open(organization_id)
                .await?,
            open_work_orders: WorkOrderRepository::new(self.db)
                .count_open(organization_id)
                .await?,
            parking_spaces_total,
            parking_spaces_occupied,
            visitors_today,
        })
    }

    /// Completed payments received between `from` and `to`, both days inclusive.
    pub async fn revenue(
        &self,
        organization_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RevenueReport, AppError> {
        if to < from {
            return Err(AppError::BadRequest(
                "Range end cannot be before its start".to_string(),
            ));
        }

        let (start, end) = day_range(from, to)?;
        let payments = PaymentRepository::new(self.db)
            .get_completed_between(organization_id, start, end)
            .await?;

        Ok(RevenueReport::from_payments(from, to, &payments))
    }
}

/// Half-open UTC range covering the days `first..=last`.
fn day_range(
    first: NaiveDate,
    last: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let end = last
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::BadRequest(format!("Date {} is out of range", last)))?;

    Ok((
        first.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
        end.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
    ))
}
