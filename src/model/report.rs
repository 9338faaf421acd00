use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub buildings: u64,
    pub units_total: u64,
    pub units_occupied: u64,
    pub units_vacant: u64,
    pub units_maintenance: u64,
    /// Occupied units as a percentage of all units, two decimals.
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

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RevenueReportParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueBucketDto {
    pub label: String,
    pub amount: i64,
    pub payments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueReportDto {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: i64,
    /// Labelled `YYYY-MM`, ascending.
    pub by_month: Vec<RevenueBucketDto>,
    /// Labelled by payment method, descending by amount.
    pub by_method: Vec<RevenueBucketDto>,
}
