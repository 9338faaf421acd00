use super::*;
use crate::{
    model::billing::PaymentMethod,
    server::{
        model::payment::RecordPaymentParams,
        service::{payment::PaymentService, report::ReportService},
    },
};

fn payment(
    organization_id: i32,
    invoice_id: i32,
    amount: i64,
    method: PaymentMethod,
    paid_at: DateTime<Utc>,
) -> RecordPaymentParams {
    RecordPaymentParams {
        organization_id,
        invoice_id,
        amount,
        method,
        reference: None,
        paid_at,
        recorded_by: None,
    }
}

/// Tests the dashboard counts occupancy, billing, operations and today's visitors.
///
/// Expected: 1 of 2 units occupied, outstanding balance net of payments, this month's revenue
#[tokio::test]
async fn dashboard_summarizes_organization() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let today = date(2026, 10, 8);

    let org = factory::create_organization(db).await?;
    let (building, _, tenant, _) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;
    factory::create_unit(db, org.id, building.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .total(300_000)
        .due_date(date(2026, 9, 30))
        .status("overdue")
        .build()
        .await?;
    PaymentService::new(db)
        .record(
            payment(org.id, invoice.id, 250_000, PaymentMethod::Cash, at(2026, 10, 2, 10, 0)),
            today,
        )
        .await?;
    factory::complaint::create_complaint(db, org.id, tenant.id, "open").await?;
    factory::work_order::create_work_order(db, org.id, building.id, None, "completed").await?;
    factory::parking::create_space(db, org.id, building.id).await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Hanna",
        "Delivery",
        at(2026, 10, 8, 9, 0),
        None,
    )
    .await?;
    factory::visitor_log::create_visit(
        db,
        org.id,
        building.id,
        "Yonas",
        "Meeting",
        at(2026, 10, 7, 9, 0),
        None,
    )
    .await?;

    let dashboard = ReportService::new(db).dashboard(org.id, today).await?;

    assert_eq!(dashboard.buildings, 1);
    assert_eq!(dashboard.units_total, 2);
    assert_eq!(dashboard.units_occupied, 1);
    assert_eq!(dashboard.units_vacant, 1);
    assert_eq!(dashboard.occupancy_rate, 50.0);
    assert_eq!(dashboard.active_leases, 1);
    assert_eq!(dashboard.active_tenants, 1);
    assert_eq!(dashboard.outstanding_amount, 750_000 + 300_000);
    assert_eq!(dashboard.overdue_invoices, 1);
    assert_eq!(dashboard.revenue_this_month, 250_000);
    assert_eq!(dashboard.open_complaints, 1);
    assert_eq!(dashboard.open_work_orders, 0);
    assert_eq!(dashboard.parking_spaces_total, 1);
    assert_eq!(dashboard.parking_spaces_occupied, 0);
    assert_eq!(dashboard.visitors_today, 1);

    Ok(())
}

/// Tests revenue includes payments on both boundary days and leaves voided ones out.
///
/// Expected: total 400_000 split over two months, bank transfer first
#[tokio::test]
async fn revenue_groups_completed_payments() -> Result<(), AppError> {
    let test = TestBuilder::new().with_billing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    let today = date(2026, 10, 8);
    let payments = PaymentService::new(db);

    payments
        .record(
            payment(org.id, invoice.id, 100_000, PaymentMethod::Cash, at(2026, 9, 1, 0, 0)),
            today,
        )
        .await?;
    payments
        .record(
            payment(
                org.id,
                invoice.id,
                300_000,
                PaymentMethod::BankTransfer,
                at(2026, 10, 31, 23, 59),
            ),
            today,
        )
        .await?;
    let voided = payments
        .record(
            payment(org.id, invoice.id, 50_000, PaymentMethod::Cash, at(2026, 10, 3, 12, 0)),
            today,
        )
        .await?;
    payments.void(org.id, voided.id, today).await?;
    payments
        .record(
            payment(org.id, invoice.id, 70_000, PaymentMethod::Cash, at(2026, 11, 1, 0, 0)),
            today,
        )
        .await?;

    let report = ReportService::new(db)
        .revenue(org.id, date(2026, 9, 1), date(2026, 10, 31))
        .await?;

    assert_eq!(report.total, 400_000);
    assert_eq!(report.by_month.len(), 2);
    assert_eq!(report.by_month[0].label, "2026-09");
    assert_eq!(report.by_month[1].amount, 300_000);
    assert_eq!(report.by_method[0].label, "bank_transfer");

    Ok(())
}

/// Tests a reversed range is rejected.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn revenue_rejects_reversed_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_billing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;

    let result = ReportService::new(db)
        .revenue(org.id, date(2026, 10, 31), date(2026, 10, 1))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
