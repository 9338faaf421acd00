//! Parking spaces, pricing, assignments and violations.

pub mod assignment;
pub mod pricing;
pub mod space;
pub mod violation;

/// Tag for grouping parking endpoints in OpenAPI documentation
pub static PARKING_TAG: &str = "parking";
