use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_organization_table::Organization,
    m20261001_000002_create_user_table::User,
    m20261001_000003_create_building_table::Building,
    m20261001_000004_create_unit_table::Unit,
    m20261001_000016_create_complaint_table::Complaint,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkOrder::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkOrder::Id))
                    .col(integer(WorkOrder::OrganizationId))
                    .col(integer(WorkOrder::BuildingId))
                    .col(integer_null(WorkOrder::UnitId))
                    .col(integer_null(WorkOrder::ComplaintId))
                    .col(string(WorkOrder::Title))
                    .col(text(WorkOrder::Description))
                    .col(string(WorkOrder::Priority))
                    .col(string(WorkOrder::Status))
                    .col(integer_null(WorkOrder::AssignedTo))
                    .col(big_integer_null(WorkOrder::EstimatedCost))
                    .col(big_integer_null(WorkOrder::ActualCost))
                    .col(date_null(WorkOrder::DueDate))
                    .col(
                        timestamp_with_time_zone(WorkOrder::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(WorkOrder::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_order_organization_id")
                            .from(WorkOrder::Table, WorkOrder::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_order_building_id")
                            .from(WorkOrder::Table, WorkOrder::BuildingId)
                            .to(Building::Table, Building::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_order_unit_id")
                            .from(WorkOrder::Table, WorkOrder::UnitId)
                            .to(Unit::Table, Unit::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_order_complaint_id")
                            .from(WorkOrder::Table, WorkOrder::ComplaintId)
                            .to(Complaint::Table, Complaint::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_order_assigned_to")
                            .from(WorkOrder::Table, WorkOrder::AssignedTo)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WorkOrder {
    Table,
    Id,
    OrganizationId,
    BuildingId,
    UnitId,
    ComplaintId,
    Title,
    Description,
    Priority,
    Status,
    AssignedTo,
    EstimatedCost,
    ActualCost,
    DueDate,
    CreatedAt,
    CompletedAt,
}
