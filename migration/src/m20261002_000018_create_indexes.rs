use sea_orm_migration::prelude::*;

use super::{
    m20261001_000002_create_user_table::User,
    m20261001_000004_create_unit_table::Unit,
    m20261001_000005_create_tenant_table::Tenant,
    m20261001_000006_create_lease_table::Lease,
    m20261001_000007_create_invoice_table::Invoice,
    m20261001_000011_create_parking_space_table::ParkingSpace,
    m20261001_000013_create_parking_assignment_table::ParkingAssignment,
    m20261001_000015_create_visitor_log_table::VisitorLog,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_user_organization_phone")
                    .table(User::Table)
                    .col(User::OrganizationId)
                    .col(User::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenant_organization_phone")
                    .table(Tenant::Table)
                    .col(Tenant::OrganizationId)
                    .col(Tenant::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_unit_building_number")
                    .table(Unit::Table)
                    .col(Unit::BuildingId)
                    .col(Unit::UnitNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_space_building_number")
                    .table(ParkingSpace::Table)
                    .col(ParkingSpace::BuildingId)
                    .col(ParkingSpace::SpaceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_organization_number")
                    .table(Invoice::Table)
                    .col(Invoice::OrganizationId)
                    .col(Invoice::InvoiceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_organization_status")
                    .table(Invoice::Table)
                    .col(Invoice::OrganizationId)
                    .col(Invoice::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_lease_period")
                    .table(Invoice::Table)
                    .col(Invoice::LeaseId)
                    .col(Invoice::BillingPeriod)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_visitor_log_organization_check_in")
                    .table(VisitorLog::Table)
                    .col(VisitorLog::OrganizationId)
                    .col(VisitorLog::CheckIn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lease_unit_status")
                    .table(Lease::Table)
                    .col(Lease::UnitId)
                    .col(Lease::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_assignment_space_status")
                    .table(ParkingAssignment::Table)
                    .col(ParkingAssignment::SpaceId)
                    .col(ParkingAssignment::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_organization_phone").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tenant_organization_phone").table(Tenant::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_unit_building_number").table(Unit::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parking_space_building_number").table(ParkingSpace::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_organization_number").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_organization_status").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoice_lease_period").table(Invoice::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_visitor_log_organization_check_in").table(VisitorLog::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_lease_unit_status").table(Lease::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parking_assignment_space_status").table(ParkingAssignment::Table).to_owned())
            .await?;

        Ok(())
    }
}
