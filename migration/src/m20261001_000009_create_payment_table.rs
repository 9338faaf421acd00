use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000002_create_user_table::User,
    m20261001_000005_create_tenant_table::Tenant,
    m20261001_000007_create_invoice_table::Invoice,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::OrganizationId))
                    .col(integer(Payment::InvoiceId))
                    .col(integer(Payment::TenantId))
                    .col(big_integer(Payment::Amount))
                    .col(string(Payment::Method))
                    .col(string_null(Payment::Reference))
                    .col(string(Payment::Status))
                    .col(timestamp_with_time_zone(Payment::PaidAt))
                    .col(integer_null(Payment::RecordedBy))
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_organization_id")
                            .from(Payment::Table, Payment::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_invoice_id")
                            .from(Payment::Table, Payment::InvoiceId)
                            .to(Invoice::Table, Invoice::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_tenant_id")
                            .from(Payment::Table, Payment::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_recorded_by")
                            .from(Payment::Table, Payment::RecordedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    OrganizationId,
    InvoiceId,
    TenantId,
    Amount,
    Method,
    Reference,
    Status,
    PaidAt,
    RecordedBy,
    CreatedAt,
}
