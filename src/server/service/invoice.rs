//! Invoicing: manual invoices, monthly batch generation and overdue marking.
//!
//! Invoice numbers follow `INV-YYYYMM-NNNN` where `YYYYMM` is the issue month and `NNNN` a
//! per-organization sequence for that month.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::billing::{InvoiceItemCategory, InvoiceStatus},
    server::{
        data::{
            invoice::InvoiceRepository,
            lease::LeaseRepository,
            parking::{
                assignment::ParkingAssignmentRepository, pricing::ParkingPricingRepository,
                space::ParkingSpaceRepository,
            },
            payment_intent::PaymentIntentRepository,
            tenant::TenantRepository,
            unit::UnitRepository,
        },
        error::AppError,
        model::{
            invoice::{
                checked_total, derive_status, CreateInvoiceParams, GenerationResult, Invoice,
                InvoiceFilter, InvoiceItemParams, NewInvoice, UpdateInvoiceParams,
            },
            page::Page,
        },
        util::period::BillingPeriod,
    },
};

pub struct InvoiceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvoiceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a manual invoice with the next free number for its issue month.
    ///
    /// # Returns
    /// - `Ok(Invoice)` - Created invoice with items
    /// - `Err(AppError::NotFound)` - Tenant or lease not in the organization
    /// - `Err(AppError::BadRequest)` - Invalid items or dates
    pub async fn create(&self, new: NewInvoice, today: NaiveDate) -> Result<Invoice, AppError> {
        let total = validate_items(&new.items)?;
        validate_dates(new.issue_date, new.due_date)?;

        TenantRepository::new(self.db)
            .find_in_organization(new.organization_id, new.tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", new.tenant_id)))?;

        if let Some(lease_id) = new.lease_id {
            let lease = LeaseRepository::new(self.db)
                .find_in_organization(new.organization_id, lease_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Lease {} not found", lease_id)))?;
            if lease.tenant_id != new.tenant_id {
                return Err(AppError::BadRequest(format!(
                    "Lease {} does not belong to tenant {}",
                    lease_id, new.tenant_id
                )));
            }
        }

        let status = derive_status(total, 0, new.due_date, today);

        let txn = self.db.begin().await?;
        let invoice = insert_numbered(
            &txn,
            CreateInvoiceParams {
                organization_id: new.organization_id,
                tenant_id: new.tenant_id,
                lease_id: new.lease_id,
                invoice_number: String::new(),
                billing_period: None,
                issue_date: new.issue_date,
                due_date: new.due_date,
                status,
                notes: new.notes,
                items: new.items,
            },
        )
        .await?;
        txn.commit().await?;

        tracing::info!(
            "Created invoice {} for tenant {}",
            invoice.invoice_number,
            invoice.tenant_id
        );

        Ok(invoice)
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<Invoice, AppError> {
        InvoiceRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: InvoiceFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Invoice>, AppError> {
        if let Some(period) = &filter.period {
            BillingPeriod::parse(period)?;
        }

        let result = InvoiceRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Replaces items, due date and notes of an invoice nobody has paid towards.
    pub async fn update(
        &self,
        params: UpdateInvoiceParams,
        today: NaiveDate,
    ) -> Result<Invoice, AppError> {
        let total = validate_items(&params.items)?;

        let repo = InvoiceRepository::new(self.db);
        let invoice = repo
            .find_in_organization(params.organization_id, params.id)
            .await?
            .ok_or_else(|| not_found(params.id))?;

        if invoice.status == InvoiceStatus::Cancelled {
            return Err(AppError::Conflict(format!(
                "Invoice {} is cancelled",
                invoice.invoice_number
            )));
        }
        if invoice.amount_paid > 0 {
            return Err(AppError::Conflict(format!(
                "Invoice {} already has payments",
                invoice.invoice_number
            )));
        }
        validate_dates(invoice.issue_date, params.due_date)?;

        let status = derive_status(total, 0, params.due_date, today);

        let txn = self.db.begin().await?;
        let updated = InvoiceRepository::new(&txn)
            .update(params, status)
            .await?
            .ok_or_else(|| not_found(invoice.id))?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Cancels an unpaid invoice and any pending payment intents for it.
    pub async fn cancel(&self, organization_id: i32, id: i32) -> Result<Invoice, AppError> {
        let invoice = self.get(organization_id, id).await?;

        if invoice.status == InvoiceStatus::Cancelled {
            return Err(AppError::Conflict(format!(
                "Invoice {} is already cancelled",
                invoice.invoice_number
            )));
        }
        if invoice.amount_paid > 0 {
            return Err(AppError::Conflict(format!(
                "Invoice {} has payments and cannot be cancelled",
                invoice.invoice_number
            )));
        }

        let txn = self.db.begin().await?;
        InvoiceRepository::new(&txn)
            .set_status(invoice.id, InvoiceStatus::Cancelled)
            .await?;
        let intents = PaymentIntentRepository::new(&txn)
            .cancel_pending_for_invoice(invoice.id)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Cancelled invoice {} ({} pending intents cancelled)",
            invoice.invoice_number,
            intents
        );

        Ok(Invoice {
            status: InvoiceStatus::Cancelled,
            ..invoice
        })
    }

    /// Generates rent invoices for one billing period.
    ///
    /// Every active lease overlapping the period gets one invoice with a rent item. Each
    /// active monthly parking assignment of its tenant is billed once per period, on the
    /// first of the tenant's invoices. Leases already invoiced for the period are skipped,
    /// so running twice generates nothing new.
    pub async fn generate_monthly(
        &self,
        organization_id: i32,
        period: BillingPeriod,
        due_days: i64,
        today: NaiveDate,
    ) -> Result<GenerationResult, AppError> {
        if due_days < 0 {
            return Err(AppError::BadRequest(
                "Due days cannot be negative".to_string(),
            ));
        }

        let period_label = period.to_string();
        let first_day = period.first_day()?;
        let last_day = period.last_day()?;
        let issue_date = today;
        let due_date = Duration::try_days(due_days)
            .and_then(|days| today.checked_add_signed(days))
            .ok_or_else(|| AppError::BadRequest("Due days out of range".to_string()))?;
        let number_period = BillingPeriod::containing(issue_date);

        let txn = self.db.begin().await?;
        let repo = InvoiceRepository::new(&txn);

        let leases = LeaseRepository::new(&txn)
            .get_active_overlapping(organization_id, first_day, last_day)
            .await?;
        let invoiced: HashSet<i32> = repo
            .lease_ids_for_period(organization_id, &period_label)
            .await?
            .into_iter()
            .collect();
        let mut billed_assignments: HashSet<i32> = repo
            .parking_assignment_ids_for_period(organization_id, &period_label)
            .await?
            .into_iter()
            .collect();
        let mut sequence = next_sequence(&repo, organization_id, number_period).await?;

        let mut invoice_ids = Vec::new();
        let mut skipped = 0;
        for lease in leases {
            if invoiced.contains(&lease.id) {
                skipped += 1;
                continue;
            }

            let unit_label = UnitRepository::new(&txn)
                .find_in_organization(organization_id, lease.unit_id)
                .await?
                .map(|unit| unit.unit_number)
                .unwrap_or_else(|| lease.unit_id.to_string());

            let mut items = vec![InvoiceItemParams {
                category: InvoiceItemCategory::Rent,
                description: format!("Rent for unit {} ({})", unit_label, period_label),
                quantity: 1,
                unit_price: lease.monthly_rent,
                parking_assignment_id: None,
            }];
            items.extend(
                monthly_parking_items(&txn, organization_id, lease.tenant_id, &period_label)
                    .await?
                    .into_iter()
                    .filter(|item| {
                        !matches!(
                            item.parking_assignment_id,
                            Some(id) if billed_assignments.contains(&id)
                        )
                    }),
            );

            let Some(total) = checked_total(&items) else {
                tracing::warn!(
                    "Invoice total for lease {} is too large; lease not billed for {}",
                    lease.id,
                    period_label
                );
                skipped += 1;
                continue;
            };
            billed_assignments.extend(items.iter().filter_map(|item| item.parking_assignment_id));

            let invoice = repo
                .create(CreateInvoiceParams {
                    organization_id,
                    tenant_id: lease.tenant_id,
                    lease_id: Some(lease.id),
                    invoice_number: invoice_number(number_period, sequence),
                    billing_period: Some(period_label.clone()),
                    issue_date,
                    due_date,
                    status: derive_status(total, 0, due_date, today),
                    notes: None,
                    items,
                })
                .await
                .map_err(created_concurrently)?;
            invoice_ids.push(invoice.id);
            sequence += 1;
        }

        txn.commit().await?;

        tracing::info!(
            "Generated {} invoices for organization {} period {} ({} skipped)",
            invoice_ids.len(),
            organization_id,
            period_label,
            skipped
        );

        Ok(GenerationResult {
            period: period_label,
            generated: invoice_ids.len() as u64,
            skipped,
            invoice_ids,
        })
    }

    /// Marks pending and partially paid invoices past their due date as overdue.
    ///
    /// `None` covers every organization.
    pub async fn mark_overdue(
        &self,
        organization_id: Option<i32>,
        today: NaiveDate,
    ) -> Result<u64, AppError> {
        let updated = InvoiceRepository::new(self.db)
            .mark_overdue(organization_id, today)
            .await?;

        if updated > 0 {
            tracing::info!("Marked {} invoices overdue", updated);
        }

        Ok(updated)
    }
}

/// Parking items for a tenant's active monthly assignments.
///
/// Assignments whose space type has no active pricing are left out.
async fn monthly_parking_items<C: ConnectionTrait>(
    db: &C,
    organization_id: i32,
    tenant_id: i32,
    period_label: &str,
) -> Result<Vec<InvoiceItemParams>, AppError> {
    let assignments = ParkingAssignmentRepository::new(db)
        .get_active_monthly_for_tenant(tenant_id)
        .await?;

    let mut items = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let Some(space) = ParkingSpaceRepository::new(db)
            .find_in_organization(organization_id, assignment.space_id)
            .await?
        else {
            continue;
        };
        let Some(pricing) = ParkingPricingRepository::new(db)
            .find_active(organization_id, space.space_type)
            .await?
        else {
            tracing::warn!(
                "No active {} parking pricing; assignment {} not billed",
                space.space_type,
                assignment.id
            );
            continue;
        };

        items.push(InvoiceItemParams {
            category: InvoiceItemCategory::Parking,
            description: format!(
                "Monthly parking space {} for {} ({})",
                space.space_number, assignment.vehicle_plate, period_label
            ),
            quantity: 1,
            unit_price: pricing.monthly_rate,
            parking_assignment_id: Some(assignment.id),
        });
    }

    Ok(items)
}

/// Formats `INV-YYYYMM-NNNN`.
pub fn invoice_number(period: BillingPeriod, sequence: u32) -> String {
    format!("INV-{}-{:04}", period.compact(), sequence)
}

/// Sequence following the highest numbered of `numbers`, or 1 when the month has no
/// invoices yet.
pub fn sequence_after<'a>(numbers: impl IntoIterator<Item = &'a str>) -> u32 {
    numbers
        .into_iter()
        .filter_map(|number| number.rsplit('-').next())
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .map_or(1, |last| last + 1)
}

/// Inserts an invoice under the next free number of its issue month, replacing
/// `params.invoice_number`.
pub(super) async fn insert_numbered<C: ConnectionTrait>(
    db: &C,
    mut params: CreateInvoiceParams,
) -> Result<Invoice, AppError> {
    let repo = InvoiceRepository::new(db);
    let period = BillingPeriod::containing(params.issue_date);

    let sequence = next_sequence(&repo, params.organization_id, period).await?;
    params.invoice_number = invoice_number(period, sequence);

    repo.create(params).await.map_err(created_concurrently)
}

/// Maps unique index violations on invoice number or lease period to a retryable conflict.
fn created_concurrently(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(
            "Another invoice was created at the same time, try again".to_string(),
        ),
        _ => err.into(),
    }
}

async fn next_sequence<C: ConnectionTrait>(
    repo: &InvoiceRepository<'_, C>,
    organization_id: i32,
    period: BillingPeriod,
) -> Result<u32, AppError> {
    let prefix = format!("INV-{}-", period.compact());
    let numbers = repo.numbers_with_prefix(organization_id, &prefix).await?;

    Ok(sequence_after(numbers.iter().map(String::as_str)))
}

/// Validates the items and returns their total.
fn validate_items(items: &[InvoiceItemParams]) -> Result<i64, AppError> {
    if items.is_empty() {
        return Err(AppError::BadRequest(
            "An invoice needs at least one item".to_string(),
        ));
    }

    for item in items {
        if item.description.is_empty() {
            return Err(AppError::BadRequest(
                "Item description is required".to_string(),
            ));
        }
        if item.quantity < 1 {
            return Err(AppError::BadRequest(
                "Item quantity must be at least 1".to_string(),
            ));
        }
        if item.unit_price < 0 {
            return Err(AppError::BadRequest(
                "Item unit price cannot be negative".to_string(),
            ));
        }
    }

    checked_total(items).ok_or_else(|| {
        AppError::BadRequest("Invoice total is too large".to_string())
    })
}

fn validate_dates(issue_date: NaiveDate, due_date: NaiveDate) -> Result<(), AppError> {
    if due_date < issue_date {
        return Err(AppError::BadRequest(
            "Due date cannot be before the issue date".to_string(),
        ));
    }

    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Invoice {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_zero_padded() {
        let period = BillingPeriod::parse("2026-03").unwrap();
        assert_eq!(invoice_number(period, 7), "INV-202603-0007");
        assert_eq!(invoice_number(period, 12345), "INV-202603-12345");
    }

    #[test]
    fn sequence_continues_from_latest() {
        assert_eq!(sequence_after([]), 1);
        assert_eq!(sequence_after(["INV-202603-0041"]), 42);
        assert_eq!(sequence_after(["garbage"]), 1);
    }

    #[test]
    fn sequence_orders_numerically_past_four_digits() {
        assert_eq!(
            sequence_after(["INV-202603-9999", "INV-202603-10000", "INV-202603-0002"]),
            10001
        );
    }
}
