use super::*;
use crate::{
    model::billing::{InvoiceItemCategory, InvoiceStatus, PaymentIntentStatus, PaymentProviderKind},
    server::{
        model::{
            invoice::{InvoiceFilter, InvoiceItemParams, NewInvoice},
            payment_intent::NewPaymentIntent,
        },
        service::{
            invoice::InvoiceService, payment_intent::PaymentIntentService,
            provider::PaymentProviders,
        },
        util::period::BillingPeriod,
    },
};

fn item(description: &str, quantity: i32, unit_price: i64) -> InvoiceItemParams {
    InvoiceItemParams {
        category: InvoiceItemCategory::Utility,
        description: description.to_string(),
        quantity,
        unit_price,
        parking_assignment_id: None,
    }
}

/// Tests manual invoices total their items and are numbered per issue month.
///
/// Expected: INV-202610-0001 then INV-202610-0002, total 2 x 150_000 + 40_000
#[tokio::test]
async fn create_numbers_invoices_by_issue_month() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let service = InvoiceService::new(db);
    let new = || NewInvoice {
        organization_id: org.id,
        tenant_id: tenant.id,
        lease_id: None,
        issue_date: date(2026, 10, 5),
        due_date: date(2026, 10, 20),
        notes: None,
        items: vec![item("Water", 2, 150_000), item("Electricity", 1, 40_000)],
    };

    let first = service.create(new(), date(2026, 10, 5)).await?;
    let second = service.create(new(), date(2026, 10, 5)).await?;

    assert_eq!(first.invoice_number, "INV-202610-0001");
    assert_eq!(second.invoice_number, "INV-202610-0002");
    assert_eq!(first.total, 340_000);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.status, InvoiceStatus::Pending);

    Ok(())
}

/// Tests an invoice needs at least one item.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn create_rejects_empty_items() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;

    let result = InvoiceService::new(db)
        .create(
            NewInvoice {
                organization_id: org.id,
                tenant_id: tenant.id,
                lease_id: None,
                issue_date: date(2026, 10, 5),
                due_date: date(2026, 10, 20),
                notes: None,
                items: Vec::new(),
            },
            date(2026, 10, 5),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests monthly generation bills rent plus monthly parking and runs only once per period.
///
/// Expected: one invoice of rent 1_000_000 and parking 600_000 due after 10 days; the
/// second run generates nothing and skips the lease
#[tokio::test]
async fn generate_monthly_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (building, _, tenant, lease) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    let assignment = factory::parking::create_active_assignment(
        db,
        org.id,
        space.id,
        Some(tenant.id),
        "monthly",
        at(2026, 9, 1, 8, 0),
    )
    .await?;

    let service = InvoiceService::new(db);
    let period = BillingPeriod::parse("2026-10")?;
    let today = date(2026, 10, 1);

    let first = service.generate_monthly(org.id, period, 10, today).await?;

    assert_eq!(first.period, "2026-10");
    assert_eq!(first.generated, 1);
    assert_eq!(first.skipped, 0);

    let invoice = service.get(org.id, first.invoice_ids[0]).await?;
    assert_eq!(invoice.lease_id, Some(lease.id));
    assert_eq!(invoice.billing_period.as_deref(), Some("2026-10"));
    assert_eq!(invoice.invoice_number, "INV-202610-0001");
    assert_eq!(invoice.due_date, date(2026, 10, 11));
    assert_eq!(invoice.total, 1_600_000);
    assert_eq!(invoice.items.len(), 2);
    assert!(invoice
        .items
        .iter()
        .any(|item| item.parking_assignment_id == Some(assignment.id)
            && item.category == InvoiceItemCategory::Parking));

    let second = service.generate_monthly(org.id, period, 10, today).await?;

    assert_eq!(second.generated, 0);
    assert_eq!(second.skipped, 1);
    assert!(second.invoice_ids.is_empty());

    Ok(())
}

/// Tests leases that ended before the period are not billed.
///
/// Expected: nothing generated for 2027-01
#[tokio::test]
async fn generate_monthly_ignores_leases_outside_period() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;

    let result = InvoiceService::new(db)
        .generate_monthly(org.id, BillingPeriod::parse("2027-01")?, 10, date(2027, 1, 1))
        .await?;

    assert_eq!(result.generated, 0);
    assert_eq!(result.skipped, 0);

    Ok(())
}

/// Tests cancelling an invoice also cancels its pending payment intents.
///
/// Expected: invoice cancelled, intent cancelled, second cancel conflicts
#[tokio::test]
async fn cancel_closes_pending_intents() -> Result<(), AppError> {
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
        .create(
            NewPaymentIntent {
                organization_id: org.id,
                invoice_id: invoice.id,
                provider: PaymentProviderKind::Telebirr,
                amount: None,
            },
            "ETB",
        )
        .await?;

    let service = InvoiceService::new(db);
    let cancelled = service.cancel(org.id, invoice.id).await?;
    assert_eq!(cancelled.status, InvoiceStatus::Cancelled);

    let intent = PaymentIntentService::new(db, &providers)
        .get(org.id, intent.id)
        .await?;
    assert_eq!(intent.status, PaymentIntentStatus::Cancelled);

    let again = service.cancel(org.id, invoice.id).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests invoices with payments can't be cancelled.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn cancel_rejects_paid_amount() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .amount_paid(200_000)
        .status("partially_paid")
        .build()
        .await?;

    let result = InvoiceService::new(db).cancel(org.id, invoice.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests overdue marking only touches unpaid invoices past their due date.
///
/// Expected: one invoice marked overdue
#[tokio::test]
async fn mark_overdue_updates_past_due() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let late = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .due_date(date(2026, 10, 1))
        .build()
        .await?;
    factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .due_date(date(2026, 11, 1))
        .build()
        .await?;

    let service = InvoiceService::new(db);
    let updated = service.mark_overdue(Some(org.id), date(2026, 10, 19)).await?;

    assert_eq!(updated, 1);
    assert_eq!(
        service.get(org.id, late.id).await?.status,
        InvoiceStatus::Overdue
    );

    Ok(())
}

/// Tests numbering continues past four digits.
///
/// Expected: INV-202610-10001 after INV-202610-9999 and INV-202610-10000
#[tokio::test]
async fn create_numbers_past_four_digits() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    for number in ["INV-202610-9999", "INV-202610-10000"] {
        factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
            .invoice_number(number)
            .build()
            .await?;
    }

    let invoice = InvoiceService::new(db)
        .create(
            NewInvoice {
                organization_id: org.id,
                tenant_id: tenant.id,
                lease_id: None,
                issue_date: date(2026, 10, 5),
                due_date: date(2026, 10, 20),
                notes: None,
                items: vec![item("Water", 1, 40_000)],
            },
            date(2026, 10, 5),
        )
        .await?;

    assert_eq!(invoice.invoice_number, "INV-202610-10001");

    Ok(())
}

/// Tests item amounts that don't fit a 64-bit total are rejected.
///
/// Expected: Err(AppError::BadRequest) and no invoice created
#[tokio::test]
async fn create_rejects_overflowing_total() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let service = InvoiceService::new(db);

    let result = service
        .create(
            NewInvoice {
                organization_id: org.id,
                tenant_id: tenant.id,
                lease_id: None,
                issue_date: date(2026, 10, 5),
                due_date: date(2026, 10, 20),
                notes: None,
                items: vec![item("Generator", 2, i64::MAX / 2 + 1)],
            },
            date(2026, 10, 5),
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let invoices = service
        .get_paginated(org.id, InvoiceFilter::default(), 0, 10)
        .await?;
    assert_eq!(invoices.total, 0);

    Ok(())
}

/// Tests a tenant with two leases pays each monthly parking space once per period.
///
/// Expected: two invoices, one parking item between them
#[tokio::test]
async fn generate_monthly_bills_parking_once_per_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (building, _, tenant, _) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let second_unit = factory::unit::UnitFactory::new(db, org.id, building.id)
        .status("occupied")
        .build()
        .await?;
    factory::lease::create_lease(db, org.id, tenant.id, second_unit.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    factory::parking::create_active_assignment(
        db,
        org.id,
        space.id,
        Some(tenant.id),
        "monthly",
        at(2026, 9, 1, 8, 0),
    )
    .await?;

    let service = InvoiceService::new(db);
    let result = service
        .generate_monthly(org.id, BillingPeriod::parse("2026-10")?, 10, date(2026, 10, 1))
        .await?;
    assert_eq!(result.generated, 2);

    let mut parking_items = 0;
    for id in result.invoice_ids {
        let invoice = service.get(org.id, id).await?;
        parking_items += invoice
            .items
            .iter()
            .filter(|item| item.category == InvoiceItemCategory::Parking)
            .count();
    }
    assert_eq!(parking_items, 1);

    Ok(())
}

/// Tests a lease invoiced in a later run doesn't bill parking already billed for the period.
///
/// Expected: the second run creates one rent-only invoice
#[tokio::test]
async fn generate_monthly_skips_parking_billed_earlier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_parking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (building, _, tenant, _) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    let space = factory::parking::create_space(db, org.id, building.id).await?;
    factory::parking::create_standard_pricing(db, org.id).await?;
    factory::parking::create_active_assignment(
        db,
        org.id,
        space.id,
        Some(tenant.id),
        "monthly",
        at(2026, 9, 1, 8, 0),
    )
    .await?;

    let service = InvoiceService::new(db);
    let period = BillingPeriod::parse("2026-10")?;

    let first = service
        .generate_monthly(org.id, period, 10, date(2026, 10, 1))
        .await?;
    assert_eq!(first.generated, 1);

    let second_unit = factory::unit::UnitFactory::new(db, org.id, building.id)
        .status("occupied")
        .build()
        .await?;
    factory::lease::create_lease(db, org.id, tenant.id, second_unit.id).await?;

    let second = service
        .generate_monthly(org.id, period, 10, date(2026, 10, 3))
        .await?;
    assert_eq!(second.generated, 1);
    assert_eq!(second.skipped, 1);

    let invoice = service.get(org.id, second.invoice_ids[0]).await?;
    assert_eq!(invoice.items.len(), 1);
    assert_eq!(invoice.items[0].category, InvoiceItemCategory::Rent);
    assert_eq!(invoice.total, 1_000_000);

    Ok(())
}
