//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Handling complex multi-step operations

pub mod admin;
pub mod auth;
pub mod building;
pub mod complaint;
pub mod invoice;
pub mod lease;
pub mod organization;
pub mod parking;
pub mod payment;
pub mod payment_intent;
pub mod provider;
pub mod report;
pub mod tenant;
pub mod unit;
pub mod user;
pub mod visitor_log;
pub mod work_order;

#[cfg(test)]
mod test;
