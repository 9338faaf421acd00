//! API data transfer objects.
//!
//! Request and response shapes serialized over the JSON API, together with the string
//! enumerations shared between the API and the persisted records.

pub mod api;
pub mod billing;
pub mod maintenance;
pub mod organization;
pub mod parking;
pub mod property;
pub mod report;
pub mod tenant;
pub mod user;
pub mod visitor;
