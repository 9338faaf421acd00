//! Invoice factory. Creates the invoice with a single rent item covering the total.

use crate::factory::helpers::next_id;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct InvoiceFactory<'a> {
    db: &'a DatabaseConnection,
    organization_id: i32,
    tenant_id: i32,
    lease_id: Option<i32>,
    invoice_number: Option<String>,
    billing_period: Option<String>,
    due_date: NaiveDate,
    total: i64,
    amount_paid: i64,
    status: String,
}

impl<'a> InvoiceFactory<'a> {
    /// Defaults: total 1_000_000, nothing paid, pending, due 2026-10-10.
    pub fn new(db: &'a DatabaseConnection, organization_id: i32, tenant_id: i32) -> Self {
        Self {
            db,
            organization_id,
            tenant_id,
            lease_id: None,
            invoice_number: None,
            billing_period: None,
            due_date: NaiveDate::from_ymd_opt(2026, 10, 10).unwrap_or_default(),
            total: 1_000_000,
            amount_paid: 0,
            status: "pending".to_string(),
        }
    }

    pub fn lease(mut self, lease_id: i32, billing_period: impl Into<String>) -> Self {
        self.lease_id = Some(lease_id);
        self.billing_period = Some(billing_period.into());
        self
    }

    /// Overrides the generated `INV-TEST-NNNN` number.
    pub fn invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn total(mut self, total: i64) -> Self {
        self.total = total;
        self
    }

    pub fn amount_paid(mut self, amount_paid: i64) -> Self {
        self.amount_paid = amount_paid;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::invoice::Model, DbErr> {
        let issue_date = self.due_date - chrono::Duration::days(7);
        let invoice = entity::invoice::ActiveModel {
            organization_id: ActiveValue::Set(self.organization_id),
            tenant_id: ActiveValue::Set(self.tenant_id),
            lease_id: ActiveValue::Set(self.lease_id),
            invoice_number: ActiveValue::Set(
                self.invoice_number
                    .unwrap_or_else(|| format!("INV-TEST-{:04}", next_id())),
            ),
            billing_period: ActiveValue::Set(self.billing_period),
            issue_date: ActiveValue::Set(issue_date),
            due_date: ActiveValue::Set(self.due_date),
            total: ActiveValue::Set(self.total),
            amount_paid: ActiveValue::Set(self.amount_paid),
            status: ActiveValue::Set(self.status),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        entity::invoice_item::ActiveModel {
            invoice_id: ActiveValue::Set(invoice.id),
            category: ActiveValue::Set("rent".to_string()),
            description: ActiveValue::Set("Rent".to_string()),
            quantity: ActiveValue::Set(1),
            unit_price: ActiveValue::Set(invoice.total),
            amount: ActiveValue::Set(invoice.total),
            parking_assignment_id: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(invoice)
    }
}

pub async fn create_invoice(
    db: &DatabaseConnection,
    organization_id: i32,
    tenant_id: i32,
) -> Result<entity::invoice::Model, DbErr> {
    InvoiceFactory::new(db, organization_id, tenant_id)
        .build()
        .await
}
