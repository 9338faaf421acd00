use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::organization::OrganizationRepository,
    error::AppError,
    service::{invoice::InvoiceService, lease::LeaseService},
    util::period::BillingPeriod,
};

/// Starts the daily billing scheduler.
///
/// Runs at 00:05 UTC every day and, in order:
/// - Expires active leases whose end date has passed
/// - Marks unpaid invoices past their due date as overdue
/// - Generates the current month's rent invoices for every active organization
///
/// Generation is idempotent per lease and period, so daily runs only pick up leases that
/// became active since the last run.
///
/// # Arguments
/// - `db`: Database connection
/// - `invoice_due_days`: Days between issue and due date of generated invoices
pub async fn start_scheduler(db: DatabaseConnection, invoice_due_days: i64) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();

    let job = Job::new_async("0 5 0 * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            run_daily_billing(&db, Utc::now().date_naive(), invoice_due_days).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Billing scheduler started");

    Ok(())
}

/// Runs every daily billing step for `today`.
///
/// A failing step is logged and does not prevent the following steps from running.
pub async fn run_daily_billing(db: &DatabaseConnection, today: NaiveDate, invoice_due_days: i64) {
    match LeaseService::new(db).expire_leases(today).await {
        Ok(expired) if expired > 0 => tracing::info!("Expired {} leases", expired),
        Ok(_) => {}
        Err(e) => tracing::error!("Error expiring leases: {}", e),
    }

    if let Err(e) = InvoiceService::new(db).mark_overdue(None, today).await {
        tracing::error!("Error marking overdue invoices: {}", e);
    }

    if let Err(e) = generate_current_period(db, today, invoice_due_days).await {
        tracing::error!("Error generating monthly invoices: {}", e);
    }
}

async fn generate_current_period(
    db: &DatabaseConnection,
    today: NaiveDate,
    invoice_due_days: i64,
) -> Result<(), AppError> {
    let period = BillingPeriod::containing(today);
    let organization_ids = OrganizationRepository::new(db).get_active_ids().await?;

    for organization_id in organization_ids {
        match InvoiceService::new(db)
            .generate_monthly(organization_id, period, invoice_due_days, today)
            .await
        {
            Ok(result) if result.generated > 0 => tracing::info!(
                "Generated {} invoices for organization {} period {}",
                result.generated,
                organization_id,
                result.period
            ),
            Ok(_) => {}
            Err(e) => tracing::error!(
                "Error generating invoices for organization {}: {}",
                organization_id,
                e
            ),
        }
    }

    Ok(())
}
