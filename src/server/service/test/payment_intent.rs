use super::*;
use crate::{
    model::billing::{InvoiceStatus, PaymentIntentStatus, PaymentMethod, PaymentProviderKind},
    server::{
        model::{payment::RecordPaymentParams, payment_intent::NewPaymentIntent},
        service::{
            invoice::InvoiceService,
            payment::PaymentService,
            payment_intent::PaymentIntentService,
            provider::{mock::MockProvider, PaymentProviders, VerificationOutcome},
        },
    },
};

fn new_intent(organization_id: i32, invoice_id: i32, amount: Option<i64>) -> NewPaymentIntent {
    NewPaymentIntent {
        organization_id,
        invoice_id,
        provider: PaymentProviderKind::Chapa,
        amount,
    }
}

/// Tests an intent defaults to the balance and carries a unique reference and checkout URL.
///
/// Expected: pending intent for 1_000_000 with a PI- reference
#[tokio::test]
async fn create_collects_full_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let providers = PaymentProviders::mocked("http://localhost:8080");

    let intent = PaymentIntentService::new(db, &providers)
        .create(new_intent(org.id, invoice.id, None), "ETB")
        .await?;

    assert_eq!(intent.status, PaymentIntentStatus::Pending);
    assert_eq!(intent.amount, 1_000_000);
    assert_eq!(intent.currency, "ETB");
    assert!(intent
        .provider_reference
        .starts_with(&format!("PI-{}-{}-", org.id, invoice.id)));
    assert!(intent.checkout_url.is_some());

    Ok(())
}

/// Tests confirming records one payment and repeating the confirmation changes nothing.
///
/// Expected: completed intent linked to a chapa payment, invoice paid, one payment total
#[tokio::test]
async fn confirm_records_payment_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let providers = PaymentProviders::mocked("http://localhost:8080");
    let service = PaymentIntentService::new(db, &providers);
    let now = at(2026, 10, 5, 12, 0);

    let intent = service
        .create(new_intent(org.id, invoice.id, None), "ETB")
        .await?;

    let confirmed = service
        .confirm(org.id, intent.id, now, now.date_naive())
        .await?;
    assert_eq!(confirmed.status, PaymentIntentStatus::Completed);
    assert_eq!(confirmed.completed_at, Some(now));
    let payment_id = confirmed.payment_id.unwrap();

    let payment = PaymentService::new(db).get(org.id, payment_id).await?;
    assert_eq!(payment.method, PaymentMethod::Chapa);
    assert_eq!(payment.amount, 1_000_000);

    let again = service
        .confirm(org.id, intent.id, now, now.date_naive())
        .await?;
    assert_eq!(again.payment_id, Some(payment_id));

    let invoice = InvoiceService::new(db).get(org.id, invoice.id).await?;
    assert_eq!(invoice.amount_paid, 1_000_000);
    assert_eq!(invoice.status, InvoiceStatus::Paid);

    Ok(())
}

/// Tests a failed verification closes the intent without a payment.
///
/// Expected: failed intent, invoice untouched, confirming again conflicts
#[tokio::test]
async fn confirm_marks_failed_verification() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let providers = PaymentProviders::mocked("http://localhost:8080").with(
        MockProvider::new(PaymentProviderKind::Chapa, "http://localhost:8080")
            .with_outcome(VerificationOutcome::Failed),
    );
    let service = PaymentIntentService::new(db, &providers);
    let now = at(2026, 10, 5, 12, 0);

    let intent = service
        .create(new_intent(org.id, invoice.id, Some(250_000)), "ETB")
        .await?;

    let failed = service
        .confirm(org.id, intent.id, now, now.date_naive())
        .await?;
    assert_eq!(failed.status, PaymentIntentStatus::Failed);
    assert_eq!(failed.payment_id, None);

    let invoice = InvoiceService::new(db).get(org.id, invoice.id).await?;
    assert_eq!(invoice.amount_paid, 0);

    let again = service
        .confirm(org.id, intent.id, now, now.date_naive())
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests a pending verification leaves the intent open.
///
/// Expected: intent still pending
#[tokio::test]
async fn confirm_keeps_pending_verification() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let providers = PaymentProviders::mocked("http://localhost:8080").with(
        MockProvider::new(PaymentProviderKind::Chapa, "http://localhost:8080")
            .with_outcome(VerificationOutcome::Pending),
    );
    let service = PaymentIntentService::new(db, &providers);
    let now = at(2026, 10, 5, 12, 0);

    let intent = service
        .create(new_intent(org.id, invoice.id, None), "ETB")
        .await?;
    let confirmed = service
        .confirm(org.id, intent.id, now, now.date_naive())
        .await?;

    assert_eq!(confirmed.status, PaymentIntentStatus::Pending);

    Ok(())
}

/// Tests only pending intents can be cancelled.
///
/// Expected: cancelled once, then Err(AppError::Conflict)
#[tokio::test]
async fn cancel_requires_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let providers = PaymentProviders::mocked("http://localhost:8080");
    let service = PaymentIntentService::new(db, &providers);

    let intent = service
        .create(new_intent(org.id, invoice.id, None), "ETB")
        .await?;

    let cancelled = service.cancel(org.id, intent.id).await?;
    assert_eq!(cancelled.status, PaymentIntentStatus::Cancelled);

    let again = service.cancel(org.id, intent.id).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests a verified payment the invoice can no longer take closes the intent.
///
/// Expected: failed intent without a payment, invoice keeps only the manual payment
#[tokio::test]
async fn confirm_fails_intent_above_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let providers = PaymentProviders::mocked("http://localhost:8080");
    let service = PaymentIntentService::new(db, &providers);
    let now = at(2026, 10, 5, 12, 0);

    let intent = service
        .create(new_intent(org.id, invoice.id, None), "ETB")
        .await?;

    PaymentService::new(db)
        .record(
            RecordPaymentParams {
                organization_id: org.id,
                invoice_id: invoice.id,
                amount: 300_000,
                method: PaymentMethod::Cash,
                reference: None,
                paid_at: now,
                recorded_by: None,
            },
            now.date_naive(),
        )
        .await?;

    let confirmed = service
        .confirm(org.id, intent.id, now, now.date_naive())
        .await?;
    assert_eq!(confirmed.status, PaymentIntentStatus::Failed);
    assert_eq!(confirmed.payment_id, None);

    let invoice = InvoiceService::new(db).get(org.id, invoice.id).await?;
    assert_eq!(invoice.amount_paid, 300_000);
    assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);

    Ok(())
}
