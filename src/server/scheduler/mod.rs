//! Cron jobs for time-driven state changes.

pub mod billing;
