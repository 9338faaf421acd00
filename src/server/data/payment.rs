use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::billing::PaymentStatus,
    server::model::payment::{Payment, PaymentFilter, RecordPaymentParams},
};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a completed payment against an invoice of `tenant_id`.
    pub async fn create(
        &self,
        params: RecordPaymentParams,
        tenant_id: i32,
    ) -> Result<Payment, DbErr> {
        let entity = entity::payment::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            invoice_id: ActiveValue::Set(params.invoice_id),
            tenant_id: ActiveValue::Set(tenant_id),
            amount: ActiveValue::Set(params.amount),
            method: ActiveValue::Set(params.method.to_string()),
            reference: ActiveValue::Set(params.reference),
            status: ActiveValue::Set(PaymentStatus::Completed.to_string()),
            paid_at: ActiveValue::Set(params.paid_at),
            recorded_by: ActiveValue::Set(params.recorded_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Payment::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Payment>, DbErr> {
        entity::prelude::Payment::find_by_id(id)
            .filter(entity::payment::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(Payment::from_entity)
            .transpose()
    }

    /// Gets payments, most recently paid first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: PaymentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Payment>, u64), DbErr> {
        let mut query = entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrganizationId.eq(organization_id));

        if let Some(invoice_id) = filter.invoice_id {
            query = query.filter(entity::payment::Column::InvoiceId.eq(invoice_id));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(entity::payment::Column::TenantId.eq(tenant_id));
        }
        if let Some(method) = filter.method {
            query = query.filter(entity::payment::Column::Method.eq(method.to_string()));
        }

        let paginator = query
            .order_by_desc(entity::payment::Column::PaidAt)
            .order_by_desc(entity::payment::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let payments = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Payment::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((payments, total))
    }

    /// Voids a completed payment.
    ///
    /// # Returns
    /// - `Ok(true)` - Payment voided
    /// - `Ok(false)` - Payment was not completed
    pub async fn void(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Completed.to_string()))
            .col_expr(
                entity::payment::Column::Status,
                sea_orm::sea_query::Expr::value(PaymentStatus::Voided.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Completed payments with `start <= paid_at < end`, oldest first.
    pub async fn get_completed_between(
        &self,
        organization_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Payment>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrganizationId.eq(organization_id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Completed.to_string()))
            .filter(entity::payment::Column::PaidAt.gte(start))
            .filter(entity::payment::Column::PaidAt.lt(end))
            .order_by_asc(entity::payment::Column::PaidAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Payment::from_entity)
            .collect()
    }
}
