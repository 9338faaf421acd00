//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Stored snake_case enumerations are parsed into their typed variants on the way in.

pub mod building;
pub mod complaint;
pub mod invoice;
pub mod lease;
pub mod organization;
pub mod page;
pub mod parking;
pub mod payment;
pub mod payment_intent;
pub mod report;
pub mod tenant;
pub mod unit;
pub mod user;
pub mod visitor_log;
pub mod work_order;
