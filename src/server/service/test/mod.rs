use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::error::AppError;

mod auth;
mod invoice;
mod lease;
mod maintenance;
mod organization;
mod parking;
mod payment;
mod payment_intent;
mod property;
mod report;
mod user;
mod visitor_log;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}
