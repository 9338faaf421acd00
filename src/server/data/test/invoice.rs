use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use super::*;
use crate::{model::billing::InvoiceStatus, server::data::invoice::InvoiceRepository};

/// Tests only unpaid invoices past their due date turn overdue.
///
/// Expected: 2 rows updated (pending and partially paid); the paid invoice and the one
/// due today keep their status
#[tokio::test]
async fn mark_overdue_updates_unpaid_past_due() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let today = date(2026, 10, 15);

    let pending = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .due_date(date(2026, 10, 1))
        .build()
        .await?;
    let partial = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .due_date(date(2026, 10, 14))
        .amount_paid(400_000)
        .status("partially_paid")
        .build()
        .await?;
    let paid = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .due_date(date(2026, 10, 1))
        .amount_paid(1_000_000)
        .status("paid")
        .build()
        .await?;
    let due_today = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .due_date(today)
        .build()
        .await?;

    let repo = InvoiceRepository::new(db);
    let updated = repo.mark_overdue(Some(org.id), today).await?;

    assert_eq!(updated, 2);
    for (id, expected) in [
        (pending.id, InvoiceStatus::Overdue),
        (partial.id, InvoiceStatus::Overdue),
        (paid.id, InvoiceStatus::Paid),
        (due_today.id, InvoiceStatus::Pending),
    ] {
        let invoice = repo.find_in_organization(org.id, id).await?.unwrap();
        assert_eq!(invoice.status, expected);
    }

    Ok(())
}

/// Tests the outstanding amount sums unpaid balances of open invoices.
///
/// Expected: 1_000_000 + 600_000; paid and cancelled invoices are ignored
#[tokio::test]
async fn outstanding_amount_sums_open_balances() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;

    factory::invoice::create_invoice(db, org.id, tenant.id).await?;
    factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .amount_paid(400_000)
        .status("partially_paid")
        .build()
        .await?;
    factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .amount_paid(1_000_000)
        .status("paid")
        .build()
        .await?;
    factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .status("cancelled")
        .build()
        .await?;

    let outstanding = InvoiceRepository::new(db).outstanding_amount(org.id).await?;

    assert_eq!(outstanding, 1_600_000);

    Ok(())
}

/// Tests lease ids already invoiced for a period are listed once per invoice.
///
/// Expected: only the lease invoiced for 2026-10
#[tokio::test]
async fn lists_lease_ids_for_period() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let (_, _, tenant, lease) =
        factory::helpers::create_active_lease_with_dependencies(db, org.id).await?;

    factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .lease(lease.id, "2026-10")
        .build()
        .await?;
    factory::invoice::create_invoice(db, org.id, tenant.id).await?;

    let repo = InvoiceRepository::new(db);

    assert_eq!(repo.lease_ids_for_period(org.id, "2026-10").await?, vec![lease.id]);
    assert!(repo.lease_ids_for_period(org.id, "2026-11").await?.is_empty());

    Ok(())
}

/// Tests the paid amount only changes when it still holds the value read before.
///
/// Expected: a stale update affects nothing, a current one stores amount and status
#[tokio::test]
async fn set_amount_paid_requires_current_amount() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let tenant = factory::create_tenant(db, org.id).await?;
    let invoice = factory::invoice::InvoiceFactory::new(db, org.id, tenant.id)
        .amount_paid(600_000)
        .status("partially_paid")
        .build()
        .await?;
    let repo = InvoiceRepository::new(db);

    let stale = repo
        .set_amount_paid(invoice.id, 0, 600_000, InvoiceStatus::PartiallyPaid)
        .await?;
    assert!(!stale);

    let current = repo
        .set_amount_paid(invoice.id, 600_000, 1_000_000, InvoiceStatus::Paid)
        .await?;
    assert!(current);

    let stored = repo.find_in_organization(org.id, invoice.id).await?.unwrap();
    assert_eq!(stored.amount_paid, 1_000_000);
    assert_eq!(stored.status, InvoiceStatus::Paid);

    Ok(())
}

/// Tests the migrated schema holds one invoice per lease and billing period.
///
/// Expected: a second invoice for the same lease and period fails, another period is fine
#[tokio::test]
async fn migrated_schema_has_one_invoice_per_lease_period() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let org = factory::create_organization(&db).await?;
    let (_, _, tenant, lease) =
        factory::helpers::create_active_lease_with_dependencies(&db, org.id).await?;

    factory::invoice::InvoiceFactory::new(&db, org.id, tenant.id)
        .lease(lease.id, "2026-10")
        .build()
        .await?;
    let duplicate = factory::invoice::InvoiceFactory::new(&db, org.id, tenant.id)
        .lease(lease.id, "2026-10")
        .build()
        .await;
    assert!(duplicate.is_err());

    factory::invoice::InvoiceFactory::new(&db, org.id, tenant.id)
        .lease(lease.id, "2026-11")
        .build()
        .await?;

    Ok(())
}
