use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_organization_table::Organization;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenant::Table)
                    .if_not_exists()
                    .col(pk_auto(Tenant::Id))
                    .col(integer(Tenant::OrganizationId))
                    .col(string(Tenant::Name))
                    .col(string(Tenant::Phone))
                    .col(string_null(Tenant::Email))
                    .col(string_null(Tenant::NationalId))
                    .col(string(Tenant::Status))
                    .col(
                        timestamp_with_time_zone(Tenant::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenant_organization_id")
                            .from(Tenant::Table, Tenant::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tenant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tenant {
    Table,
    Id,
    OrganizationId,
    Name,
    Phone,
    Email,
    NationalId,
    Status,
    CreatedAt,
}
