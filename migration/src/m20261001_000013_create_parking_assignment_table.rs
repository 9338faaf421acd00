use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000005_create_tenant_table::Tenant,
    m20261001_000007_create_invoice_table::Invoice,
    m20261001_000011_create_parking_space_table::ParkingSpace,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingAssignment::Table)
                    .if_not_exists()
                    .col(pk_auto(ParkingAssignment::Id))
                    .col(integer(ParkingAssignment::OrganizationId))
                    .col(integer(ParkingAssignment::SpaceId))
                    .col(integer_null(ParkingAssignment::TenantId))
                    .col(string(ParkingAssignment::VehiclePlate))
                    .col(string(ParkingAssignment::AssignmentType))
                    .col(timestamp_with_time_zone(ParkingAssignment::StartTime))
                    .col(timestamp_with_time_zone_null(ParkingAssignment::EndTime))
                    .col(string(ParkingAssignment::Status))
                    .col(big_integer_null(ParkingAssignment::AmountCharged))
                    .col(integer_null(ParkingAssignment::InvoiceId))
                    .col(
                        timestamp_with_time_zone(ParkingAssignment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_assignment_organization_id")
                            .from(ParkingAssignment::Table, ParkingAssignment::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_assignment_space_id")
                            .from(ParkingAssignment::Table, ParkingAssignment::SpaceId)
                            .to(ParkingSpace::Table, ParkingSpace::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_assignment_tenant_id")
                            .from(ParkingAssignment::Table, ParkingAssignment::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_assignment_invoice_id")
                            .from(ParkingAssignment::Table, ParkingAssignment::InvoiceId)
                            .to(Invoice::Table, Invoice::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingAssignment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ParkingAssignment {
    Table,
    Id,
    OrganizationId,
    SpaceId,
    TenantId,
    VehiclePlate,
    AssignmentType,
    StartTime,
    EndTime,
    Status,
    AmountCharged,
    InvoiceId,
    CreatedAt,
}
