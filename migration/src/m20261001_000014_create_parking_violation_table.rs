use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
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
                    .table(ParkingViolation::Table)
                    .if_not_exists()
                    .col(pk_auto(ParkingViolation::Id))
                    .col(integer(ParkingViolation::OrganizationId))
                    .col(integer_null(ParkingViolation::SpaceId))
                    .col(string(ParkingViolation::VehiclePlate))
                    .col(string(ParkingViolation::ViolationType))
                    .col(big_integer(ParkingViolation::FineAmount))
                    .col(string(ParkingViolation::Status))
                    .col(text_null(ParkingViolation::Notes))
                    .col(timestamp_with_time_zone(ParkingViolation::IssuedAt))
                    .col(timestamp_with_time_zone_null(ParkingViolation::ResolvedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_violation_organization_id")
                            .from(ParkingViolation::Table, ParkingViolation::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_violation_space_id")
                            .from(ParkingViolation::Table, ParkingViolation::SpaceId)
                            .to(ParkingSpace::Table, ParkingSpace::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingViolation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ParkingViolation {
    Table,
    Id,
    OrganizationId,
    SpaceId,
    VehiclePlate,
    ViolationType,
    FineAmount,
    Status,
    Notes,
    IssuedAt,
    ResolvedAt,
}
