use super::*;
use crate::{
    model::billing::{InvoiceStatus, PaymentMethod, PaymentStatus},
    server::{
        model::payment::{PaymentFilter, RecordPaymentParams},
        service::{invoice::InvoiceService, payment::PaymentService},
    },
};

fn cash(organization_id: i32, invoice_id: i32, amount: i64) -> RecordPaymentParams {
    RecordPaymentParams {
        organization_id,
        invoice_id,
        amount,
        method: PaymentMethod::Cash,
        reference: None,
        paid_at: at(2026, 10, 5, 9, 0),
        recorded_by: None,
    }
}

/// Tests partial then full payments move the invoice through its statuses.
///
/// Expected: partially_paid after 400_000, paid after the remaining 600_000
#[tokio::test]
async fn record_settles_invoice() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let today = date(2026, 10, 5);
    let payments = PaymentService::new(db);
    let invoices = InvoiceService::new(db);

    let payment = payments.record(cash(org.id, invoice.id, 400_000), today).await?;
    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(payment.tenant_id, tenant.id);

    let partial = invoices.get(org.id, invoice.id).await?;
    assert_eq!(partial.amount_paid, 400_000);
    assert_eq!(partial.status, InvoiceStatus::PartiallyPaid);

    payments.record(cash(org.id, invoice.id, 600_000), today).await?;

    let paid = invoices.get(org.id, invoice.id).await?;
    assert_eq!(paid.amount_paid, 1_000_000);
    assert_eq!(paid.status, InvoiceStatus::Paid);

    Ok(())
}

/// Tests payments can't exceed the balance or be empty.
///
/// Expected: Err(AppError::BadRequest) for both
#[tokio::test]
async fn record_rejects_invalid_amounts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let payments = PaymentService::new(db);

    let over = payments
        .record(cash(org.id, invoice.id, 1_000_001), date(2026, 10, 5))
        .await;
    assert!(matches!(over, Err(AppError::BadRequest(_))));

    let zero = payments
        .record(cash(org.id, invoice.id, 0), date(2026, 10, 5))
        .await;
    assert!(matches!(zero, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests cancelled invoices accept no payments.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn record_rejects_cancelled_invoice() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .status("cancelled")
        .build()
        .await?;

    let result = PaymentService::new(db)
        .record(cash(org.id, invoice.id, 100_000), date(2026, 10, 5))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests voiding a payment takes its amount back off an overdue-by-now invoice.
///
/// Expected: payment voided, invoice back to nothing paid and overdue, second void conflicts
#[tokio::test]
async fn void_restores_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let payments = PaymentService::new(db);

    let payment = payments
        .record(cash(org.id, invoice.id, 1_000_000), date(2026, 10, 5))
        .await?;

    let voided = payments.void(org.id, payment.id, date(2026, 10, 19)).await?;
    assert_eq!(voided.status, PaymentStatus::Voided);

    let invoice = InvoiceService::new(db).get(org.id, invoice.id).await?;
    assert_eq!(invoice.amount_paid, 0);
    assert_eq!(invoice.status, InvoiceStatus::Overdue);

    let again = payments.void(org.id, payment.id, date(2026, 10, 19)).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests overlapping payments can't together exceed the invoice total.
///
/// Expected: one payment recorded, the other rejected, amount paid matches the recorded payment
#[tokio::test]
async fn concurrent_payments_keep_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let today = date(2026, 10, 5);
    let payments = PaymentService::new(db);

    let (first, second) = tokio::join!(
        payments.record(cash(org.id, invoice.id, 600_000), today),
        payments.record(cash(org.id, invoice.id, 600_000), today),
    );
    let results = [first, second];
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);

    let recorded = payments
        .get_paginated(
            org.id,
            PaymentFilter {
                invoice_id: Some(invoice.id),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(recorded.total, 1);

    let invoice = InvoiceService::new(db).get(org.id, invoice.id).await?;
    assert_eq!(invoice.amount_paid, 600_000);
    assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);

    Ok(())
}

/// Tests overlapping voids of the same payment take its amount back once.
///
/// Expected: one void succeeds, the other conflicts, invoice keeps the other payment
#[tokio::test]
async fn concurrent_voids_restore_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let today = date(2026, 10, 5);
    let payments = PaymentService::new(db);

    payments.record(cash(org.id, invoice.id, 300_000), today).await?;
    let payment = payments
        .record(cash(org.id, invoice.id, 200_000), today)
        .await?;

    let (first, second) = tokio::join!(
        payments.void(org.id, payment.id, today),
        payments.void(org.id, payment.id, today),
    );
    let results = [first, second];
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|result| matches!(result, Err(AppError::Conflict(_)))));

    let invoice = InvoiceService::new(db).get(org.id, invoice.id).await?;
    assert_eq!(invoice.amount_paid, 300_000);

    Ok(())
}
