//! Invoice, payment and payment intent DTOs. Amounts are minor currency units.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    PartiallyPaid,
    Paid,
    Overdue,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceItemCategory {
    Rent,
    Parking,
    Utility,
    Maintenance,
    Penalty,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceItemDto {
    pub id: i32,
    pub category: InvoiceItemCategory,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub id: i32,
    pub tenant_id: i32,
    pub lease_id: Option<i32>,
    pub invoice_number: String,
    pub billing_period: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: i64,
    pub amount_paid: i64,
    pub balance: i64,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InvoiceItemInputDto {
    pub category: InvoiceItemCategory,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInvoiceDto {
    pub tenant_id: i32,
    pub lease_id: Option<i32>,
    /// Defaults to today.
    pub issue_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemInputDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateInvoiceDto {
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemInputDto>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceFilterParams {
    pub status: Option<InvoiceStatus>,
    pub tenant_id: Option<i32>,
    /// Billing period formatted `YYYY-MM`.
    pub period: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateInvoicesDto {
    /// Billing period formatted `YYYY-MM`.
    pub period: String,
    /// Days between issue and due date. Defaults to the server configuration.
    pub due_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateInvoicesResultDto {
    pub period: String,
    pub generated: u64,
    pub skipped: u64,
    pub invoice_ids: Vec<i32>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Cheque,
    Telebirr,
    CbeBirr,
    Chapa,
    HelloCash,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Voided,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub invoice_id: i32,
    pub tenant_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
    pub recorded_by: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordPaymentDto {
    pub invoice_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    /// Defaults to now.
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilterParams {
    pub invoice_id: Option<i32>,
    pub tenant_id: Option<i32>,
    pub method: Option<PaymentMethod>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentProviderKind {
    Telebirr,
    CbeBirr,
    Chapa,
    HelloCash,
}

impl From<PaymentProviderKind> for PaymentMethod {
    fn from(kind: PaymentProviderKind) -> Self {
        match kind {
            PaymentProviderKind::Telebirr => PaymentMethod::Telebirr,
            PaymentProviderKind::CbeBirr => PaymentMethod::CbeBirr,
            PaymentProviderKind::Chapa => PaymentMethod::Chapa,
            PaymentProviderKind::HelloCash => PaymentMethod::HelloCash,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentIntentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentDto {
    pub id: i32,
    pub invoice_id: i32,
    pub provider: PaymentProviderKind,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentIntentStatus,
    pub provider_reference: String,
    pub checkout_url: Option<String>,
    pub payment_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePaymentIntentDto {
    pub invoice_id: i32,
    pub provider: PaymentProviderKind,
    /// Defaults to the invoice balance.
    pub amount: Option<i64>,
}
