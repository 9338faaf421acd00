use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000004_create_unit_table::Unit,
    m20261001_000005_create_tenant_table::Tenant,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lease::Table)
                    .if_not_exists()
                    .col(pk_auto(Lease::Id))
                    .col(integer(Lease::OrganizationId))
                    .col(integer(Lease::TenantId))
                    .col(integer(Lease::UnitId))
                    .col(date(Lease::StartDate))
                    .col(date(Lease::EndDate))
                    .col(big_integer(Lease::MonthlyRent))
                    .col(big_integer(Lease::Deposit))
                    .col(string(Lease::Status))
                    .col(date_null(Lease::TerminatedAt))
                    .col(
                        timestamp_with_time_zone(Lease::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lease_organization_id")
                            .from(Lease::Table, Lease::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lease_tenant_id")
                            .from(Lease::Table, Lease::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lease_unit_id")
                            .from(Lease::Table, Lease::UnitId)
                            .to(Unit::Table, Unit::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lease::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lease {
    Table,
    Id,
    OrganizationId,
    TenantId,
    UnitId,
    StartDate,
    EndDate,
    MonthlyRent,
    Deposit,
    Status,
    TerminatedAt,
    CreatedAt,
}
