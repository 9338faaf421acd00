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
                    .table(ParkingPricing::Table)
                    .if_not_exists()
                    .col(pk_auto(ParkingPricing::Id))
                    .col(integer(ParkingPricing::OrganizationId))
                    .col(string(ParkingPricing::SpaceType))
                    .col(big_integer(ParkingPricing::HourlyRate))
                    .col(big_integer(ParkingPricing::DailyRate))
                    .col(big_integer(ParkingPricing::MonthlyRate))
                    .col(boolean(ParkingPricing::Active))
                    .col(
                        timestamp_with_time_zone(ParkingPricing::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_pricing_organization_id")
                            .from(ParkingPricing::Table, ParkingPricing::OrganizationId)
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
            .drop_table(Table::drop().table(ParkingPricing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ParkingPricing {
    Table,
    Id,
    OrganizationId,
    SpaceType,
    HourlyRate,
    DailyRate,
    MonthlyRate,
    Active,
    CreatedAt,
}
