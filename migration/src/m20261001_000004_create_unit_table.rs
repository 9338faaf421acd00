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
                    .table(Unit::Table)
                    .if_not_exists()
                    .col(pk_auto(Unit::Id))
                    .col(integer(Unit::OrganizationId))
                    .col(integer(Unit::BuildingId))
                    .col(string(Unit::UnitNumber))
                    .col(integer(Unit::Floor))
                    .col(integer_null(Unit::AreaSqm))
                    .col(big_integer(Unit::MonthlyRent))
                    .col(string(Unit::Status))
                    .col(
                        timestamp_with_time_zone(Unit::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unit_organization_id")
                            .from(Unit::Table, Unit::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unit_building_id")
                            .from(Unit::Table, Unit::BuildingId)
                            .to(Building::Table, Building::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Unit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Unit {
    Table,
    Id,
    OrganizationId,
    BuildingId,
    UnitNumber,
    Floor,
    AreaSqm,
    MonthlyRent,
    Status,
    CreatedAt,
}
