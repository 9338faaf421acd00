//! SeaORM entity definitions.
//!
//! One module per table. Enumerated columns are stored as snake_case strings and parsed
//! into typed enums by the server's domain models.

pub mod prelude;

pub mod building;
pub mod complaint;
pub mod invoice;
pub mod invoice_item;
pub mod lease;
pub mod organization;
pub mod parking_assignment;
pub mod parking_pricing;
pub mod parking_space;
pub mod parking_violation;
pub mod payment;
pub mod payment_intent;
pub mod tenant;
pub mod unit;
pub mod user;
pub mod visitor_log;
pub mod work_order;
