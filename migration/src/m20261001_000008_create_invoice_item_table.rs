use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000007_create_invoice_table::Invoice;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvoiceItem::Table)
                    .if_not_exists()
                    .col(pk_auto(InvoiceItem::Id))
                    .col(integer(InvoiceItem::InvoiceId))
                    .col(string(InvoiceItem::Category))
                    .col(string(InvoiceItem::Description))
                    .col(integer(InvoiceItem::Quantity))
                    .col(big_integer(InvoiceItem::UnitPrice))
                    .col(big_integer(InvoiceItem::Amount))
                    .col(integer_null(InvoiceItem::ParkingAssignmentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_item_invoice_id")
                            .from(InvoiceItem::Table, InvoiceItem::InvoiceId)
                            .to(Invoice::Table, Invoice::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvoiceItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InvoiceItem {
    Table,
    Id,
    InvoiceId,
    Category,
    Description,
    Quantity,
    UnitPrice,
    Amount,
    ParkingAssignmentId,
}
