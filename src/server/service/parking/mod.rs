//! Parking spaces, pricing, assignments and violations.

pub mod assignment;
pub mod pricing;
pub mod space;
pub mod violation;
