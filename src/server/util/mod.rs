//! Small helpers shared by the service and data layers.

pub mod normalize;
pub mod parse;
pub mod password;
pub mod period;
pub mod stats;
