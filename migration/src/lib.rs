pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_organization_table;
mod m20261001_000002_create_user_table;
mod m20261001_000003_create_building_table;
mod m20261001_000004_create_unit_table;
mod m20261001_000005_create_tenant_table;
mod m20261001_000006_create_lease_table;
mod m20261001_000007_create_invoice_table;
mod m20261001_000008_create_invoice_item_table;
mod m20261001_000009_create_payment_table;
mod m20261001_000010_create_payment_intent_table;
mod m20261001_000011_create_parking_space_table;
mod m20261001_000012_create_parking_pricing_table;
mod m20261001_000013_create_parking_assignment_table;
mod m20261001_000014_create_parking_violation_table;
mod m20261001_000015_create_visitor_log_table;
mod m20261001_000016_create_complaint_table;
mod m20261001_000017_create_work_order_table;
mod m20261002_000018_create_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_organization_table::Migration),
            Box::new(m20261001_000002_create_user_table::Migration),
            Box::new(m20261001_000003_create_building_table::Migration),
            Box::new(m20261001_000004_create_unit_table::Migration),
            Box::new(m20261001_000005_create_tenant_table::Migration),
            Box::new(m20261001_000006_create_lease_table::Migration),
            Box::new(m20261001_000007_create_invoice_table::Migration),
            Box::new(m20261001_000008_create_invoice_item_table::Migration),
            Box::new(m20261001_000009_create_payment_table::Migration),
            Box::new(m20261001_000010_create_payment_intent_table::Migration),
            Box::new(m20261001_000011_create_parking_space_table::Migration),
            Box::new(m20261001_000012_create_parking_pricing_table::Migration),
            Box::new(m20261001_000013_create_parking_assignment_table::Migration),
            Box::new(m20261001_000014_create_parking_violation_table::Migration),
            Box::new(m20261001_000015_create_visitor_log_table::Migration),
            Box::new(m20261001_000016_create_complaint_table::Migration),
            Box::new(m20261001_000017_create_work_order_table::Migration),
            Box::new(m20261002_000018_create_indexes::Migration),
        ]
    }
}
