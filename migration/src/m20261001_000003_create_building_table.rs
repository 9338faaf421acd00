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
                    .table(Building::Table)
                    .if_not_exists()
                    .col(pk_auto(Building::Id))
                    .col(integer(Building::OrganizationId))
                    .col(string(Building::Name))
                    .col(string(Building::Address))
                    .col(integer(Building::Floors))
                    .col(
                        timestamp_with_time_zone(Building::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_building_organization_id")
                            .from(Building::Table, Building::OrganizationId)
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
            .drop_table(Table::drop().table(Building::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Building {
    Table,
    Id,
    OrganizationId,
    Name,
    Address,
    Floors,
    CreatedAt,
}
