use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::billing::InvoiceStatus,
    server::model::invoice::{
        CreateInvoiceParams, Invoice, InvoiceFilter, InvoiceItemParams, UpdateInvoiceParams,
    },
};

pub struct InvoiceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvoiceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an invoice and its line items. The total is the sum of the item amounts.
    pub async fn create(&self, params: CreateInvoiceParams) -> Result<Invoice, DbErr> {
        let total = params.total();

        let invoice = entity::invoice::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            tenant_id: ActiveValue::Set(params.tenant_id),
            lease_id: ActiveValue::Set(params.lease_id),
            invoice_number: ActiveValue::Set(params.invoice_number),
            billing_period: ActiveValue::Set(params.billing_period),
            issue_date: ActiveValue::Set(params.issue_date),
            due_date: ActiveValue::Set(params.due_date),
            total: ActiveValue::Set(total),
            amount_paid: ActiveValue::Set(0),
            status: ActiveValue::Set(params.status.to_string()),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let items = self.insert_items(invoice.id, params.items).await?;

        Invoice::from_entity(invoice, items)
    }

    async fn insert_items(
        &self,
        invoice_id: i32,
        items: Vec<InvoiceItemParams>,
    ) -> Result<Vec<entity::invoice_item::Model>, DbErr> {
        let mut inserted = Vec::with_capacity(items.len());

        for item in items {
            let amount = item.amount();
            let entity = entity::invoice_item::ActiveModel {
                invoice_id: ActiveValue::Set(invoice_id),
                category: ActiveValue::Set(item.category.to_string()),
                description: ActiveValue::Set(item.description),
                quantity: ActiveValue::Set(item.quantity),
                unit_price: ActiveValue::Set(item.unit_price),
                amount: ActiveValue::Set(amount),
                parking_assignment_id: ActiveValue::Set(item.parking_assignment_id),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            inserted.push(entity);
        }

        Ok(inserted)
    }

    async fn items_for(
        &self,
        invoice_ids: Vec<i32>,
    ) -> Result<HashMap<i32, Vec<entity::invoice_item::Model>>, DbErr> {
        let mut grouped: HashMap<i32, Vec<entity::invoice_item::Model>> = HashMap::new();
        if invoice_ids.is_empty() {
            return Ok(grouped);
        }

        let items = entity::prelude::InvoiceItem::find()
            .filter(entity::invoice_item::Column::InvoiceId.is_in(invoice_ids))
            .order_by_asc(entity::invoice_item::Column::Id)
            .all(self.db)
            .await?;

        for item in items {
            grouped.entry(item.invoice_id).or_default().push(item);
        }

        Ok(grouped)
    }

    async fn with_items(&self, invoices: Vec<entity::invoice::Model>) -> Result<Vec<Invoice>, DbErr> {
        let mut items = self
            .items_for(invoices.iter().map(|invoice| invoice.id).collect())
            .await?;

        invoices
            .into_iter()
            .map(|invoice| {
                let invoice_items = items.remove(&invoice.id).unwrap_or_default();
                Invoice::from_entity(invoice, invoice_items)
            })
            .collect()
    }

    /// Finds an invoice with its items.
    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Invoice>, DbErr> {
        let Some(invoice) = entity::prelude::Invoice::find_by_id(id)
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut invoices = self.with_items(vec![invoice]).await?;

        Ok(invoices.pop())
    }

    /// Gets invoices with their items, newest first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: InvoiceFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Invoice>, u64), DbErr> {
        let mut query = entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::invoice::Column::Status.eq(status.to_string()));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(entity::invoice::Column::TenantId.eq(tenant_id));
        }
        if let Some(period) = filter.period {
            query = query.filter(entity::invoice::Column::BillingPeriod.eq(period));
        }

        let paginator = query
            .order_by_desc(entity::invoice::Column::IssueDate)
            .order_by_desc(entity::invoice::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let invoices = self.with_items(paginator.fetch_page(page).await?).await?;

        Ok((invoices, total))
    }

    /// Invoice numbers of the organization starting with `prefix`.
    pub async fn numbers_with_prefix(
        &self,
        organization_id: i32,
        prefix: &str,
    ) -> Result<Vec<String>, DbErr> {
        entity::prelude::Invoice::find()
            .select_only()
            .column(entity::invoice::Column::InvoiceNumber)
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id))
            .filter(entity::invoice::Column::InvoiceNumber.starts_with(prefix))
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Lease ids that already have an invoice for the billing period.
    pub async fn lease_ids_for_period(
        &self,
        organization_id: i32,
        period: &str,
    ) -> Result<Vec<i32>, DbErr> {
        let ids = entity::prelude::Invoice::find()
            .select_only()
            .column(entity::invoice::Column::LeaseId)
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id))
            .filter(entity::invoice::Column::BillingPeriod.eq(period))
            .filter(entity::invoice::Column::LeaseId.is_not_null())
            .into_tuple::<Option<i32>>()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().flatten().collect())
    }

    /// Parking assignment ids already billed on an invoice for the billing period.
    pub async fn parking_assignment_ids_for_period(
        &self,
        organization_id: i32,
        period: &str,
    ) -> Result<Vec<i32>, DbErr> {
        let invoice_ids = entity::prelude::Invoice::find()
            .select_only()
            .column(entity::invoice::Column::Id)
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id))
            .filter(entity::invoice::Column::BillingPeriod.eq(period))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;
        if invoice_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = entity::prelude::InvoiceItem::find()
            .select_only()
            .column(entity::invoice_item::Column::ParkingAssignmentId)
            .filter(entity::invoice_item::Column::InvoiceId.is_in(invoice_ids))
            .filter(entity::invoice_item::Column::ParkingAssignmentId.is_not_null())
            .into_tuple::<Option<i32>>()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().flatten().collect())
    }

    /// Replaces due date, notes and line items, recomputing the total.
    pub async fn update(
        &self,
        params: UpdateInvoiceParams,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, DbErr> {
        let Some(invoice) = entity::prelude::Invoice::find_by_id(params.id)
            .filter(entity::invoice::Column::OrganizationId.eq(params.organization_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        entity::prelude::InvoiceItem::delete_many()
            .filter(entity::invoice_item::Column::InvoiceId.eq(invoice.id))
            .exec(self.db)
            .await?;

        let total = params
            .items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.amount()));
        let items = self.insert_items(invoice.id, params.items).await?;

        let mut active_model: entity::invoice::ActiveModel = invoice.into();
        active_model.due_date = ActiveValue::Set(params.due_date);
        active_model.notes = ActiveValue::Set(params.notes);
        active_model.total = ActiveValue::Set(total);
        active_model.status = ActiveValue::Set(status.to_string());

        let entity = active_model.update(self.db).await?;

        Invoice::from_entity(entity, items).map(Some)
    }

    /// Stores a new paid amount together with its derived status, provided the invoice
    /// still has `previous` paid.
    ///
    /// # Returns
    /// - `Ok(true)` - Amount updated
    /// - `Ok(false)` - The paid amount changed since it was read
    pub async fn set_amount_paid(
        &self,
        id: i32,
        previous: i64,
        amount_paid: i64,
        status: InvoiceStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Invoice::update_many()
            .filter(entity::invoice::Column::Id.eq(id))
            .filter(entity::invoice::Column::AmountPaid.eq(previous))
            .col_expr(
                entity::invoice::Column::AmountPaid,
                sea_orm::sea_query::Expr::value(amount_paid),
            )
            .col_expr(
                entity::invoice::Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn set_status(&self, id: i32, status: InvoiceStatus) -> Result<(), DbErr> {
        entity::prelude::Invoice::update_many()
            .filter(entity::invoice::Column::Id.eq(id))
            .col_expr(
                entity::invoice::Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Flags pending and partially paid invoices due before `today` as overdue.
    ///
    /// Runs across all organizations when `organization_id` is `None`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of invoices that became overdue
    pub async fn mark_overdue(
        &self,
        organization_id: Option<i32>,
        today: NaiveDate,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Invoice::update_many()
            .filter(entity::invoice::Column::Status.is_in([
                InvoiceStatus::Pending.to_string(),
                InvoiceStatus::PartiallyPaid.to_string(),
            ]))
            .filter(entity::invoice::Column::DueDate.lt(today));

        if let Some(organization_id) = organization_id {
            query = query.filter(entity::invoice::Column::OrganizationId.eq(organization_id));
        }

        let result = query
            .col_expr(
                entity::invoice::Column::Status,
                sea_orm::sea_query::Expr::value(InvoiceStatus::Overdue.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn exists_for_tenant(&self, tenant_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::TenantId.eq(tenant_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Sum of unpaid balances over invoices that still accept payments.
    pub async fn outstanding_amount(&self, organization_id: i32) -> Result<i64, DbErr> {
        let amounts = entity::prelude::Invoice::find()
            .select_only()
            .column(entity::invoice::Column::Total)
            .column(entity::invoice::Column::AmountPaid)
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id))
            .filter(entity::invoice::Column::Status.is_in([
                InvoiceStatus::Pending.to_string(),
                InvoiceStatus::PartiallyPaid.to_string(),
                InvoiceStatus::Overdue.to_string(),
            ]))
            .into_tuple::<(i64, i64)>()
            .all(self.db)
            .await?;

        Ok(amounts
            .into_iter()
            .map(|(total, paid)| (total - paid).max(0))
            .sum())
    }

    pub async fn count_with_status(
        &self,
        organization_id: i32,
        status: InvoiceStatus,
    ) -> Result<u64, DbErr> {
        entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::OrganizationId.eq(organization_id))
            .filter(entity::invoice::Column::Status.eq(status.to_string()))
            .count(self.db)
            .await
    }
}
