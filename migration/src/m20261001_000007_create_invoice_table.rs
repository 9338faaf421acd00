use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000005_create_tenant_table::Tenant,
    m20261001_000006_create_lease_table::Lease,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(pk_auto(Invoice::Id))
                    .col(integer(Invoice::OrganizationId))
                    .col(integer(Invoice::TenantId))
                    .col(integer_null(Invoice::LeaseId))
                    .col(string(Invoice::InvoiceNumber))
                    .col(string_null(Invoice::BillingPeriod))
                    .col(date(Invoice::IssueDate))
                    .col(date(Invoice::DueDate))
                    .col(big_integer(Invoice::Total))
                    .col(big_integer(Invoice::AmountPaid))
                    .col(string(Invoice::Status))
                    .col(text_null(Invoice::Notes))
                    .col(
                        timestamp_with_time_zone(Invoice::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_organization_id")
                            .from(Invoice::Table, Invoice::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_tenant_id")
                            .from(Invoice::Table, Invoice::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_lease_id")
                            .from(Invoice::Table, Invoice::LeaseId)
                            .to(Lease::Table, Lease::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Invoice {
    Table,
    Id,
    OrganizationId,
    TenantId,
    LeaseId,
    InvoiceNumber,
    BillingPeriod,
    IssueDate,
    DueDate,
    Total,
    AmountPaid,
    Status,
    Notes,
    CreatedAt,
}
