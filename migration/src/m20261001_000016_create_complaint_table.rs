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
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(pk_auto(Complaint::Id))
                    .col(integer(Complaint::OrganizationId))
                    .col(integer(Complaint::TenantId))
                    .col(integer_null(Complaint::UnitId))
                    .col(string(Complaint::Category))
                    .col(string(Complaint::Title))
                    .col(text(Complaint::Description))
                    .col(string(Complaint::Priority))
                    .col(string(Complaint::Status))
                    .col(text_null(Complaint::Resolution))
                    .col(
                        timestamp_with_time_zone(Complaint::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Complaint::ResolvedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_organization_id")
                            .from(Complaint::Table, Complaint::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_tenant_id")
                            .from(Complaint::Table, Complaint::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_unit_id")
                            .from(Complaint::Table, Complaint::UnitId)
                            .to(Unit::Table, Unit::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaint::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Complaint {
    Table,
    Id,
    OrganizationId,
    TenantId,
    UnitId,
    Category,
    Title,
    Description,
    Priority,
    Status,
    Resolution,
    CreatedAt,
    ResolvedAt,
}
