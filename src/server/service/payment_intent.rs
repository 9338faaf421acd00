//! Online payment intents.
//!
//! An intent is created pending with a unique reference, handed to the provider, and later
//! confirmed. Confirmation records at most one payment per intent.

use chrono::{DateTime, NaiveDate, Utc};
use rand::{distr::Alphanumeric, Rng};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::billing::{InvoiceStatus, PaymentIntentStatus},
    server::{
        data::{
            invoice::InvoiceRepository, payment_intent::PaymentIntentRepository,
            tenant::TenantRepository,
        },
        error::AppError,
        model::{
            page::Page,
            payment::RecordPaymentParams,
            payment_intent::{CreatePaymentIntentParams, NewPaymentIntent, PaymentIntent},
        },
        service::{
            payment::{apply_payment, ensure_payable},
            provider::{InitiatePayment, PaymentProviders, VerificationOutcome},
        },
    },
};

const REFERENCE_SUFFIX_LENGTH: usize = 12;

pub struct PaymentIntentService<'a> {
    db: &'a DatabaseConnection,
    providers: &'a PaymentProviders,
}

impl<'a> PaymentIntentService<'a> {
    pub fn new(db: &'a DatabaseConnection, providers: &'a PaymentProviders) -> Self {
        Self { db, providers }
    }

    /// Starts collecting an invoice amount through a provider.
    ///
    /// # Returns
    /// - `Ok(PaymentIntent)` - Pending intent with the provider's checkout URL
    /// - `Err(AppError::NotFound)` - Invoice not in the organization
    /// - `Err(AppError::BadRequest)` - Amount not positive or above the balance
    /// - `Err(AppError::Conflict)` - Invoice cancelled or already paid
    /// - `Err(AppError::PaymentErr)` - Provider unavailable or request failed
    pub async fn create(
        &self,
        new: NewPaymentIntent,
        currency: &str,
    ) -> Result<PaymentIntent, AppError> {
        let invoice = InvoiceRepository::new(self.db)
            .find_in_organization(new.organization_id, new.invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice {} not found", new.invoice_id)))?;

        let amount = new.amount.unwrap_or_else(|| invoice.balance());
        ensure_payable(&invoice, amount)?;

        let tenant = TenantRepository::new(self.db)
            .find_in_organization(new.organization_id, invoice.tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Tenant {} not found", invoice.tenant_id))
            })?;

        let provider = self.providers.get(new.provider)?;
        let reference = new_reference(new.organization_id, invoice.id);
        let initiated = provider
            .initiate(&InitiatePayment {
                reference: reference.clone(),
                amount,
                currency: currency.to_string(),
                invoice_number: invoice.invoice_number.clone(),
                customer_name: tenant.name,
                customer_phone: tenant.phone,
                customer_email: tenant.email,
            })
            .await?;

        let intent = PaymentIntentRepository::new(self.db)
            .create(CreatePaymentIntentParams {
                organization_id: new.organization_id,
                invoice_id: invoice.id,
                provider: new.provider,
                amount,
                currency: currency.to_string(),
                provider_reference: reference,
                checkout_url: initiated.checkout_url,
            })
            .await?;

        tracing::info!(
            "Created {} payment intent {} for invoice {}",
            intent.provider,
            intent.id,
            invoice.invoice_number
        );

        Ok(intent)
    }

    /// Verifies an intent with its provider and settles it.
    ///
    /// Confirming an already completed intent returns it unchanged. A provider that reports
    /// the payment as still pending leaves the intent pending. A verified payment the invoice
    /// can no longer take, because other payments lowered its balance, fails the intent and
    /// is logged for reconciliation.
    pub async fn confirm(
        &self,
        organization_id: i32,
        id: i32,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<PaymentIntent, AppError> {
        let intent = self.get(organization_id, id).await?;

        match intent.status {
            PaymentIntentStatus::Pending => {}
            PaymentIntentStatus::Completed => return Ok(intent),
            status => {
                return Err(AppError::Conflict(format!(
                    "Payment intent {} is {}",
                    intent.id, status
                )))
            }
        }

        let outcome = self
            .providers
            .get(intent.provider)?
            .verify(&intent.provider_reference)
            .await?;

        match outcome {
            VerificationOutcome::Pending => return Ok(intent),
            VerificationOutcome::Failed => {
                PaymentIntentRepository::new(self.db)
                    .close_pending(intent.id, PaymentIntentStatus::Failed)
                    .await?;
                tracing::info!("Payment intent {} failed verification", intent.id);
                return self.get(organization_id, id).await;
            }
            VerificationOutcome::Succeeded => {}
        }

        let txn = self.db.begin().await?;

        let invoice = InvoiceRepository::new(&txn)
            .find_in_organization(organization_id, intent.invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Invoice {} not found", intent.invoice_id))
            })?;
        if let Err(err) = ensure_payable(&invoice, intent.amount) {
            txn.rollback().await?;
            PaymentIntentRepository::new(self.db)
                .close_pending(intent.id, PaymentIntentStatus::Failed)
                .await?;
            tracing::warn!(
                "Payment intent {} ({}) was paid but invoice {} no longer accepts {}: {}; \
                 reconcile with the provider",
                intent.id,
                intent.provider_reference,
                invoice.invoice_number,
                intent.amount,
                err
            );
            return self.get(organization_id, id).await;
        }

        let (payment, status) = apply_payment(
            &txn,
            &invoice,
            RecordPaymentParams {
                organization_id,
                invoice_id: invoice.id,
                amount: intent.amount,
                method: intent.provider.into(),
                reference: Some(intent.provider_reference.clone()),
                paid_at: now,
                recorded_by: None,
            },
            today,
        )
        .await?;

        let intent_repo = PaymentIntentRepository::new(&txn);
        if !intent_repo.complete(intent.id, payment.id, now).await? {
            // Settled by a concurrent confirmation.
            txn.rollback().await?;
            return self.get(organization_id, id).await;
        }
        if status == InvoiceStatus::Paid {
            intent_repo.cancel_pending_for_invoice(invoice.id).await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Payment intent {} completed with payment {}",
            intent.id,
            payment.id
        );

        self.get(organization_id, id).await
    }

    pub async fn cancel(&self, organization_id: i32, id: i32) -> Result<PaymentIntent, AppError> {
        let intent = self.get(organization_id, id).await?;

        if !PaymentIntentRepository::new(self.db)
            .close_pending(intent.id, PaymentIntentStatus::Cancelled)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Payment intent {} is {} and cannot be cancelled",
                intent.id, intent.status
            )));
        }

        self.get(organization_id, id).await
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<PaymentIntent, AppError> {
        PaymentIntentRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment intent {} not found", id)))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        invoice_id: Option<i32>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<PaymentIntent>, AppError> {
        let result = PaymentIntentRepository::new(self.db)
            .get_paginated(organization_id, invoice_id, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }
}

/// `PI-<org>-<invoice>-<random>`, unique across organizations.
fn new_reference(organization_id: i32, invoice_id: i32) -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(REFERENCE_SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    format!("PI-{}-{}-{}", organization_id, invoice_id, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_prefixed_and_random() {
        let first = new_reference(3, 42);
        let second = new_reference(3, 42);

        assert!(first.starts_with("PI-3-42-"));
        assert_eq!(first.len(), "PI-3-42-".len() + REFERENCE_SUFFIX_LENGTH);
        assert_ne!(first, second);
    }
}
