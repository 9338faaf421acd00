//! HTTP request handlers grouped by resource.
//!
//! Each handler authenticates through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! delegates to a service, and converts the resulting domain model into its DTO. Every
//! handler is annotated with `utoipa::path` so the router can assemble the OpenAPI
//! document from the same definitions.

pub mod auth;
pub mod building;
pub mod complaint;
pub mod invoice;
pub mod lease;
pub mod organization;
pub mod parking;
pub mod payment;
pub mod payment_intent;
pub mod report;
pub mod tenant;
pub mod unit;
pub mod user;
pub mod visitor;
pub mod work_order;
