//! Recording and voiding payments against invoices.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::billing::{InvoiceStatus, PaymentStatus},
    server::{
        data::{
            invoice::InvoiceRepository, payment::PaymentRepository,
            payment_intent::PaymentIntentRepository,
        },
        error::AppError,
        model::{
            invoice::{derive_status, Invoice},
            page::Page,
            payment::{Payment, PaymentFilter, RecordPaymentParams},
        },
    },
};

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment and updates the invoice's paid amount and status.
    ///
    /// # Returns
    /// - `Ok(Payment)` - Recorded payment
    /// - `Err(AppError::NotFound)` - Invoice not in the organization
    /// - `Err(AppError::BadRequest)` - Amount not positive or above the balance
    /// - `Err(AppError::Conflict)` - Invoice cancelled, already paid or changed concurrently
    pub async fn record(
        &self,
        params: RecordPaymentParams,
        today: NaiveDate,
    ) -> Result<Payment, AppError> {
        let txn = self.db.begin().await?;

        let invoice = InvoiceRepository::new(&txn)
            .find_in_organization(params.organization_id, params.invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Invoice {} not found", params.invoice_id))
            })?;
        ensure_payable(&invoice, params.amount)?;

        let (payment, status) = apply_payment(&txn, &invoice, params, today).await?;
        if status == InvoiceStatus::Paid {
            PaymentIntentRepository::new(&txn)
                .cancel_pending_for_invoice(invoice.id)
                .await?;
        }
        txn.commit().await?;

        tracing::info!(
            "Recorded payment {} of {} on invoice {}",
            payment.id,
            payment.amount,
            invoice.invoice_number
        );

        Ok(payment)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Payment, AppError> {
        PaymentRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: PaymentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Payment>, AppError> {
        let result = PaymentRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Voids a completed payment and takes its amount back off the invoice.
    pub async fn void(
        &self,
        organization_id: i32,
        id: i32,
        today: NaiveDate,
    ) -> Result<Payment, AppError> {
        let txn = self.db.begin().await?;
        let payment_repo = PaymentRepository::new(&txn);
        let invoice_repo = InvoiceRepository::new(&txn);

        let payment = payment_repo
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        if payment.status == PaymentStatus::Voided {
            return Err(already_voided(payment.id));
        }

        let invoice = invoice_repo
            .find_in_organization(organization_id, payment.invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Invoice {} not found", payment.invoice_id))
            })?;

        let amount_paid = (invoice.amount_paid - payment.amount).max(0);
        let status = match invoice.status {
            InvoiceStatus::Cancelled => InvoiceStatus::Cancelled,
            _ => derive_status(invoice.total, amount_paid, invoice.due_date, today),
        };

        if !payment_repo.void(payment.id).await? {
            return Err(already_voided(payment.id));
        }
        if !invoice_repo
            .set_amount_paid(invoice.id, invoice.amount_paid, amount_paid, status)
            .await?
        {
            return Err(changed_concurrently(&invoice));
        }
        txn.commit().await?;

        tracing::info!(
            "Voided payment {}; invoice {} is now {}",
            payment.id,
            invoice.invoice_number,
            status
        );

        Ok(Payment {
            status: PaymentStatus::Voided,
            ..payment
        })
    }
}

/// Checks that `amount` can be paid towards the invoice.
pub(super) fn ensure_payable(invoice: &Invoice, amount: i64) -> Result<(), AppError> {
    if !invoice.is_payable() {
        return Err(AppError::Conflict(format!(
            "Invoice {} is {} and accepts no payments",
            invoice.invoice_number, invoice.status
        )));
    }
    if amount <= 0 {
        return Err(AppError::BadRequest(
            "Payment amount must be positive".to_string(),
        ));
    }
    if amount > invoice.balance() {
        return Err(AppError::BadRequest(format!(
            "Payment amount {} exceeds the invoice balance {}",
            amount,
            invoice.balance()
        )));
    }

    Ok(())
}

/// Settles the payment against the invoice on `db` and inserts it, returning the payment
/// and the invoice's new status.
///
/// Callers read `invoice` inside the same transaction, check it with [`ensure_payable`]
/// and cancel pending payment intents once the invoice is paid. Fails with
/// `AppError::Conflict` when the invoice's paid amount changed after it was read.
pub(super) async fn apply_payment<C: ConnectionTrait>(
    db: &C,
    invoice: &Invoice,
    params: RecordPaymentParams,
    today: NaiveDate,
) -> Result<(Payment, InvoiceStatus), AppError> {
    let amount_paid = invoice.amount_paid + params.amount;
    let status = derive_status(invoice.total, amount_paid, invoice.due_date, today);

    if !InvoiceRepository::new(db)
        .set_amount_paid(invoice.id, invoice.amount_paid, amount_paid, status)
        .await?
    {
        return Err(changed_concurrently(invoice));
    }
    let payment = PaymentRepository::new(db)
        .create(params, invoice.tenant_id)
        .await?;

    Ok((payment, status))
}

fn changed_concurrently(invoice: &Invoice) -> AppError {
    AppError::Conflict(format!(
        "Invoice {} changed while the payment was processed, try again",
        invoice.invoice_number
    ))
}

fn already_voided(id: i32) -> AppError {
    AppError::Conflict(format!("Payment {} is already voided", id))
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Payment {} not found", id))
}
