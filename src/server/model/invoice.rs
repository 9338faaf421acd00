//! Invoice domain models, line items and status derivation.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::billing::{
        InvoiceDto, InvoiceItemCategory, InvoiceItemDto, InvoiceItemInputDto, InvoiceStatus,
    },
    server::util::parse::parse_enum,
};

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceItem {
    pub id: i32,
    pub invoice_id: i32,
    pub category: InvoiceItemCategory,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub amount: i64,
    pub parking_assignment_id: Option<i32>,
}

impl InvoiceItem {
    pub fn from_entity(entity: entity::invoice_item::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            invoice_id: entity.invoice_id,
            category: parse_enum("invoice_item.category", &entity.category)?,
            description: entity.description,
            quantity: entity.quantity,
            unit_price: entity.unit_price,
            amount: entity.amount,
            parking_assignment_id: entity.parking_assignment_id,
        })
    }

    pub fn into_dto(self) -> InvoiceItemDto {
        InvoiceItemDto {
            id: self.id,
            category: self.category,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            amount: self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: i32,
    pub organization_id: i32,
    pub tenant_id: i32,
    pub lease_id: Option<i32>,
    /// `INV-YYYYMM-NNNN`, unique within the organization.
    pub invoice_number: String,
    /// `YYYY-MM` for generated monthly invoices.
    pub billing_period: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: i64,
    pub amount_paid: i64,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItem>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn from_entity(
        entity: entity::invoice::Model,
        items: Vec<entity::invoice_item::Model>,
    ) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            tenant_id: entity.tenant_id,
            lease_id: entity.lease_id,
            invoice_number: entity.invoice_number,
            billing_period: entity.billing_period,
            issue_date: entity.issue_date,
            due_date: entity.due_date,
            total: entity.total,
            amount_paid: entity.amount_paid,
            status: parse_enum("invoice.status", &entity.status)?,
            notes: entity.notes,
            items: items
                .into_iter()
                .map(InvoiceItem::from_entity)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> InvoiceDto {
        let balance = self.balance();

        InvoiceDto {
            id: self.id,
            tenant_id: self.tenant_id,
            lease_id: self.lease_id,
            invoice_number: self.invoice_number,
            billing_period: self.billing_period,
            issue_date: self.issue_date,
            due_date: self.due_date,
            total: self.total,
            amount_paid: self.amount_paid,
            balance,
            status: self.status,
            notes: self.notes,
            items: self.items.into_iter().map(InvoiceItem::into_dto).collect(),
            created_at: self.created_at,
        }
    }

    /// Amount still owed.
    pub fn balance(&self) -> i64 {
        (self.total - self.amount_paid).max(0)
    }

    /// Whether the invoice still accepts payments.
    pub fn is_payable(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Cancelled | InvoiceStatus::Paid)
    }
}

/// Derives the status of a non-cancelled invoice from what has been paid.
///
/// Fully paid wins over overdue; an overdue invoice stays overdue while partially paid.
pub fn derive_status(
    total: i64,
    amount_paid: i64,
    due_date: NaiveDate,
    today: NaiveDate,
) -> InvoiceStatus {
    if amount_paid >= total {
        InvoiceStatus::Paid
    } else if due_date < today {
        InvoiceStatus::Overdue
    } else if amount_paid > 0 {
        InvoiceStatus::PartiallyPaid
    } else {
        InvoiceStatus::Pending
    }
}

/// A line item to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceItemParams {
    pub category: InvoiceItemCategory,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub parking_assignment_id: Option<i32>,
}

impl InvoiceItemParams {
    pub fn from_dto(dto: InvoiceItemInputDto) -> Self {
        Self {
            category: dto.category,
            description: dto.description.trim().to_string(),
            quantity: dto.quantity,
            unit_price: dto.unit_price,
            parking_assignment_id: None,
        }
    }

    /// Quantity times unit price, saturating at `i64::MAX`.
    ///
    /// Items are checked with [`checked_total`] before they are stored.
    pub fn amount(&self) -> i64 {
        i64::from(self.quantity).saturating_mul(self.unit_price)
    }

    pub fn checked_amount(&self) -> Option<i64> {
        i64::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Sum of the item amounts, or `None` when it doesn't fit in an `i64`.
pub fn checked_total(items: &[InvoiceItemParams]) -> Option<i64> {
    items.iter().try_fold(0i64, |total, item| {
        item.checked_amount().and_then(|amount| total.checked_add(amount))
    })
}

/// A fully validated invoice ready to insert.
#[derive(Debug, Clone)]
pub struct CreateInvoiceParams {
    pub organization_id: i32,
    pub tenant_id: i32,
    pub lease_id: Option<i32>,
    pub invoice_number: String,
    pub billing_period: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemParams>,
}

impl CreateInvoiceParams {
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.amount()))
    }
}

/// A manual invoice as requested, before number assignment and validation.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub organization_id: i32,
    pub tenant_id: i32,
    pub lease_id: Option<i32>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemParams>,
}

#[derive(Debug, Clone)]
pub struct UpdateInvoiceParams {
    pub id: i32,
    pub organization_id: i32,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItemParams>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub tenant_id: Option<i32>,
    pub period: Option<String>,
}

/// Outcome of a monthly generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub period: String,
    pub generated: u64,
    pub skipped: u64,
    pub invoice_ids: Vec<i32>,
}
