use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000003_create_building_table::Building,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSpace::Table)
                    .if_not_exists()
                    .col(pk_auto(ParkingSpace::Id))
                    .col(integer(ParkingSpace::OrganizationId))
                    .col(integer(ParkingSpace::BuildingId))
                    .col(string(ParkingSpace::SpaceNumber))
                    .col(string(ParkingSpace::SpaceType))
                    .col(string(ParkingSpace::Status))
                    .col(
                        timestamp_with_time_zone(ParkingSpace::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_space_organization_id")
                            .from(ParkingSpace::Table, ParkingSpace::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_space_building_id")
                            .from(ParkingSpace::Table, ParkingSpace::BuildingId)
                            .to(Building::Table, Building::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSpace::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ParkingSpace {
    Table,
    Id,
    OrganizationId,
    BuildingId,
    SpaceNumber,
    SpaceType,
    Status,
    CreatedAt,
}
