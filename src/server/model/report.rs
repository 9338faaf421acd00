//! Dashboard and revenue report models.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::{
    model::report::{DashboardDto, RevenueBucketDto, RevenueReportDto},
    server::model::payment::Payment,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub buildings: u64,
    pub units_total: u64,
    pub units_occupied: u64,
    pub units_vacant: u64,
    pub units_maintenance: u64,
    pub occupancy_rate: f64,
    pub active_leases: u64,
    pub active_tenants: u64,
    pub outstanding_amount: i64,
    pub overdue_invoices: u64,
    pub revenue_this_month: i64,
    pub open_complaints: u64,
    pub open_work_orders: u64,
    pub parking_spaces_total: u64,
    pub parking_spaces_occupied: u64,
    pub visitors_today: u64,
}

impl Dashboard {
    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            buildings: self.buildings,
            units_total: self.units_total,
            units_occupied: self.units_occupied,
            units_vacant: self.units_vacant,
            units_maintenance: self.units_maintenance,
            occupancy_rate: self.occupancy_rate,
            active_leases: self.active_leases,
            active_tenants: self.active_tenants,
            outstanding_amount: self.outstanding_amount,
            overdue_invoices: self.overdue_invoices,
            revenue_this_month: self.revenue_this_month,
            open_complaints: self.open_complaints,
            open_work_orders: self.open_work_orders,
            parking_spaces_total: self.parking_spaces_total,
            parking_spaces_occupied: self.parking_spaces_occupied,
            visitors_today: self.visitors_today,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueBucket {
    pub label: String,
    pub amount: i64,
    pub payments: u64,
}

impl RevenueBucket {
    fn into_dto(self) -> RevenueBucketDto {
        RevenueBucketDto {
            label: self.label,
            amount: self.amount,
            payments: self.payments,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: i64,
    pub by_month: Vec<RevenueBucket>,
    pub by_method: Vec<RevenueBucket>,
}

impl RevenueReport {
    /// Groups completed payments by `YYYY-MM` of `paid_at` (ascending) and by method
    /// (descending amount).
    pub fn from_payments(from: NaiveDate, to: NaiveDate, payments: &[Payment]) -> Self {
        let mut months: BTreeMap<String, (i64, u64)> = BTreeMap::new();
        let mut methods: HashMap<String, (i64, u64)> = HashMap::new();

        for payment in payments {
            let month = months
                .entry(payment.paid_at.format("%Y-%m").to_string())
                .or_default();
            month.0 += payment.amount;
            month.1 += 1;

            let method = methods.entry(payment.method.to_string()).or_default();
            method.0 += payment.amount;
            method.1 += 1;
        }

        let by_month = months
            .into_iter()
            .map(|(label, (amount, payments))| RevenueBucket {
                label,
                amount,
                payments,
            })
            .collect();

        let mut by_method: Vec<RevenueBucket> = methods
            .into_iter()
            .map(|(label, (amount, payments))| RevenueBucket {
                label,
                amount,
                payments,
            })
            .collect();
        by_method.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.label.cmp(&b.label)));

        Self {
            from,
            to,
            total: payments.iter().map(|p| p.amount).sum(),
            by_month,
            by_method,
        }
    }

    pub fn into_dto(self) -> RevenueReportDto {
        RevenueReportDto {
            from: self.from,
            to: self.to,
            total: self.total,
            by_month: self.by_month.into_iter().map(RevenueBucket::into_dto).collect(),
            by_method: self.by_method.into_iter().map(RevenueBucket::into_dto).collect(),
        }
    }
}
