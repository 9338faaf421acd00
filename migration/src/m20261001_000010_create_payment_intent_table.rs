use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000007_create_invoice_table::Invoice,
    m20261001_000009_create_payment_table::Payment,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentIntent::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentIntent::Id))
                    .col(integer(PaymentIntent::OrganizationId))
                    .col(integer(PaymentIntent::InvoiceId))
                    .col(string(PaymentIntent::Provider))
                    .col(big_integer(PaymentIntent::Amount))
                    .col(string(PaymentIntent::Currency))
                    .col(string(PaymentIntent::Status))
                    .col(string_uniq(PaymentIntent::ProviderReference))
                    .col(string_null(PaymentIntent::CheckoutUrl))
                    .col(integer_null(PaymentIntent::PaymentId))
                    .col(
                        timestamp_with_time_zone(PaymentIntent::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(PaymentIntent::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_intent_organization_id")
                            .from(PaymentIntent::Table, PaymentIntent::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_intent_invoice_id")
                            .from(PaymentIntent::Table, PaymentIntent::InvoiceId)
                            .to(Invoice::Table, Invoice::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_intent_payment_id")
                            .from(PaymentIntent::Table, PaymentIntent::PaymentId)
                            .to(Payment::Table, Payment::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentIntent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentIntent {
    Table,
    Id,
    OrganizationId,
    InvoiceId,
    Provider,
    Amount,
    Currency,
    Status,
    ProviderReference,
    CheckoutUrl,
    PaymentId,
    CreatedAt,
    CompletedAt,
}
