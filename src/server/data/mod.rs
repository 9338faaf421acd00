//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the service layer free of entity types. Every repository is generic
//! over `ConnectionTrait` so services can run several repositories inside one transaction.
//! Lookups that take an `organization_id` never return records of another organization.

pub mod building;
pub mod complaint;
pub mod invoice;
pub mod lease;
pub mod organization;
pub mod parking;
pub mod payment;
pub mod payment_intent;
pub mod tenant;
pub mod unit;
pub mod user;
pub mod visitor_log;
pub mod work_order;

#[cfg(test)]
mod test;
