use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Organization, User};
///
/// let test = TestBuilder::new()
///     .with_table(Organization)
///     .with_table(User)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the organization and user tables.
    pub fn with_user_tables(self) -> Self {
        self.with_table(Organization).with_table(User)
    }

    /// Adds organization, user, building, unit, tenant and lease tables.
    pub fn with_property_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Building)
            .with_table(Unit)
            .with_table(Tenant)
            .with_table(Lease)
    }

    /// Adds property tables plus invoices, payments and payment intents.
    pub fn with_billing_tables(self) -> Self {
        self.with_property_tables()
            .with_table(Invoice)
            .with_table(InvoiceItem)
            .with_table(Payment)
            .with_table(PaymentIntent)
    }

    /// Adds billing tables plus every parking table.
    ///
    /// Parking assignments reference invoices, so billing tables are always included.
    pub fn with_parking_tables(self) -> Self {
        self.with_billing_tables()
            .with_table(ParkingSpace)
            .with_table(ParkingPricing)
            .with_table(ParkingAssignment)
            .with_table(ParkingViolation)
    }

    /// Adds property tables plus complaints and work orders.
    pub fn with_maintenance_tables(self) -> Self {
        self.with_property_tables()
            .with_table(Complaint)
            .with_table(WorkOrder)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_parking_tables()
            .with_table(VisitorLog)
            .with_table(Complaint)
            .with_table(WorkOrder)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
