use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000003_create_building_table::Building,
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
                    .table(VisitorLog::Table)
                    .if_not_exists()
                    .col(pk_auto(VisitorLog::Id))
                    .col(integer(VisitorLog::OrganizationId))
                    .col(integer(VisitorLog::BuildingId))
                    .col(integer_null(VisitorLog::HostTenantId))
                    .col(string(VisitorLog::VisitorName))
                    .col(string_null(VisitorLog::VisitorPhone))
                    .col(string(VisitorLog::Purpose))
                    .col(string_null(VisitorLog::VehiclePlate))
                    .col(timestamp_with_time_zone(VisitorLog::CheckIn))
                    .col(timestamp_with_time_zone_null(VisitorLog::CheckOut))
                    .col(string(VisitorLog::Status))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visitor_log_organization_id")
                            .from(VisitorLog::Table, VisitorLog::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visitor_log_building_id")
                            .from(VisitorLog::Table, VisitorLog::BuildingId)
                            .to(Building::Table, Building::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visitor_log_host_tenant_id")
                            .from(VisitorLog::Table, VisitorLog::HostTenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitorLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VisitorLog {
    Table,
    Id,
    OrganizationId,
    BuildingId,
    HostTenantId,
    VisitorName,
    VisitorPhone,
    Purpose,
    VehiclePlate,
    CheckIn,
    CheckOut,
    Status,
}
