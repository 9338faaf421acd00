use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::billing::PaymentIntentStatus,
    server::model::payment_intent::{CreatePaymentIntentParams, PaymentIntent},
};

pub struct PaymentIntentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentIntentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending intent.
    pub async fn create(&self, params: CreatePaymentIntentParams) -> Result<PaymentIntent, DbErr> {
        let entity = entity::payment_intent::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            invoice_id: ActiveValue::Set(params.invoice_id),
            provider: ActiveValue::Set(params.provider.to_string()),
            amount: ActiveValue::Set(params.amount),
            currency: ActiveValue::Set(params.currency),
            status: ActiveValue::Set(PaymentIntentStatus::Pending.to_string()),
            provider_reference: ActiveValue::Set(params.provider_reference),
            checkout_url: ActiveValue::Set(params.checkout_url),
            payment_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        PaymentIntent::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<PaymentIntent>, DbErr> {
        entity::prelude::PaymentIntent::find_by_id(id)
            .filter(entity::payment_intent::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(PaymentIntent::from_entity)
            .transpose()
    }

    /// Gets intents newest first, optionally for one invoice.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        invoice_id: Option<i32>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<PaymentIntent>, u64), DbErr> {
        let mut query = entity::prelude::PaymentIntent::find()
            .filter(entity::payment_intent::Column::OrganizationId.eq(organization_id));

        if let Some(invoice_id) = invoice_id {
            query = query.filter(entity::payment_intent::Column::InvoiceId.eq(invoice_id));
        }

        let paginator = query
            .order_by_desc(entity::payment_intent::Column::CreatedAt)
            .order_by_desc(entity::payment_intent::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let intents = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(PaymentIntent::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((intents, total))
    }

    /// Marks a still pending intent as completed with its payment.
    ///
    /// # Returns
    /// - `Ok(true)` - The intent moved from pending to completed
    /// - `Ok(false)` - The intent was no longer pending
    pub async fn complete(
        &self,
        id: i32,
        payment_id: i32,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::PaymentIntent::update_many()
            .filter(entity::payment_intent::Column::Id.eq(id))
            .filter(
                entity::payment_intent::Column::Status
                    .eq(PaymentIntentStatus::Pending.to_string()),
            )
            .col_expr(
                entity::payment_intent::Column::Status,
                sea_orm::sea_query::Expr::value(PaymentIntentStatus::Completed.to_string()),
            )
            .col_expr(
                entity::payment_intent::Column::PaymentId,
                sea_orm::sea_query::Expr::value(payment_id),
            )
            .col_expr(
                entity::payment_intent::Column::CompletedAt,
                sea_orm::sea_query::Expr::value(completed_at),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Moves a pending intent to `failed` or `cancelled`.
    pub async fn close_pending(&self, id: i32, status: PaymentIntentStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::PaymentIntent::update_many()
            .filter(entity::payment_intent::Column::Id.eq(id))
            .filter(
                entity::payment_intent::Column::Status
                    .eq(PaymentIntentStatus::Pending.to_string()),
            )
            .col_expr(
                entity::payment_intent::Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Cancels every pending intent of an invoice, used once the invoice is settled.
    pub async fn cancel_pending_for_invoice(&self, invoice_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::PaymentIntent::update_many()
            .filter(entity::payment_intent::Column::InvoiceId.eq(invoice_id))
            .filter(
                entity::payment_intent::Column::Status
                    .eq(PaymentIntentStatus::Pending.to_string()),
            )
            .col_expr(
                entity::payment_intent::Column::Status,
                sea_orm::sea_query::Expr::value(PaymentIntentStatus::Cancelled.to_string()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
