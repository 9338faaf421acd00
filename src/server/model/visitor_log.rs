//! Visitor log domain model and visit analytics.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Timelike, Utc};
use sea_orm::DbErr;

use crate::{
    model::visitor::{CountBucketDto, VisitStatus, VisitorAnalyticsDto, VisitorLogDto},
    server::util::{
        parse::parse_enum,
        stats::{percentage, round2},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct VisitorLog {
    pub id: i32,
    pub organization_id: i32,
    pub building_id: i32,
    pub host_tenant_id: Option<i32>,
    pub visitor_name: String,
    pub visitor_phone: Option<String>,
    pub purpose: String,
    pub vehicle_plate: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: VisitStatus,
}

impl VisitorLog {
    pub fn from_entity(entity: entity::visitor_log::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            building_id: entity.building_id,
            host_tenant_id: entity.host_tenant_id,
            visitor_name: entity.visitor_name,
            visitor_phone: entity.visitor_phone,
            purpose: entity.purpose,
            vehicle_plate: entity.vehicle_plate,
            check_in: entity.check_in,
            check_out: entity.check_out,
            status: parse_enum("visitor_log.status", &entity.status)?,
        })
    }

    pub fn into_dto(self) -> VisitorLogDto {
        VisitorLogDto {
            id: self.id,
            building_id: self.building_id,
            host_tenant_id: self.host_tenant_id,
            visitor_name: self.visitor_name,
            visitor_phone: self.visitor_phone,
            purpose: self.purpose,
            vehicle_plate: self.vehicle_plate,
            check_in: self.check_in,
            check_out: self.check_out,
            status: self.status,
        }
    }

    /// Identity used for unique-visitor counting: phone when known, else the name.
    fn visitor_key(&self) -> String {
        match &self.visitor_phone {
            Some(phone) => format!("phone:{}", phone),
            None => format!("name:{}", self.visitor_name.trim().to_lowercase()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckInParams {
    pub organization_id: i32,
    pub building_id: i32,
    pub host_tenant_id: Option<i32>,
    pub visitor_name: String,
    pub visitor_phone: Option<String>,
    pub purpose: String,
    pub vehicle_plate: Option<String>,
    pub check_in: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct VisitorLogFilter {
    pub building_id: Option<i32>,
    pub status: Option<VisitStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Count with its share of all visits.
#[derive(Debug, Clone, PartialEq)]
pub struct CountBucket {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}

impl CountBucket {
    fn new(label: String, count: u64, total: u64) -> Self {
        Self {
            label,
            count,
            percentage: percentage(count, total),
        }
    }

    pub fn into_dto(self) -> CountBucketDto {
        CountBucketDto {
            label: self.label,
            count: self.count,
            percentage: self.percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisitorAnalytics {
    pub total_visits: u64,
    pub currently_checked_in: u64,
    pub unique_visitors: u64,
    /// Mean length of completed visits; `None` when no visit has checked out.
    pub average_duration_minutes: Option<f64>,
    pub by_hour: Vec<CountBucket>,
    pub by_month: Vec<CountBucket>,
    pub by_purpose: Vec<CountBucket>,
}

impl VisitorAnalytics {
    /// Aggregates visits by hour of check-in (UTC), month and purpose.
    pub fn from_visits(visits: &[VisitorLog]) -> Self {
        let total = visits.len() as u64;

        let currently_checked_in = visits
            .iter()
            .filter(|v| v.status == VisitStatus::CheckedIn)
            .count() as u64;

        let unique_visitors = visits
            .iter()
            .map(VisitorLog::visitor_key)
            .collect::<HashSet<_>>()
            .len() as u64;

        let durations: Vec<i64> = visits
            .iter()
            .filter_map(|v| v.check_out.map(|out| (out - v.check_in).num_seconds()))
            .collect();
        let average_duration_minutes = if durations.is_empty() {
            None
        } else {
            let seconds: i64 = durations.iter().sum();
            Some(round2(seconds as f64 / durations.len() as f64 / 60.0))
        };

        let mut hours = [0u64; 24];
        let mut months: BTreeMap<String, u64> = BTreeMap::new();
        let mut purposes: HashMap<String, u64> = HashMap::new();

        for visit in visits {
            hours[visit.check_in.hour() as usize] += 1;
            *months
                .entry(visit.check_in.format("%Y-%m").to_string())
                .or_default() += 1;
            *purposes.entry(visit.purpose.clone()).or_default() += 1;
        }

        let by_hour = hours
            .iter()
            .enumerate()
            .map(|(hour, count)| CountBucket::new(format!("{:02}", hour), *count, total))
            .collect();

        let by_month = months
            .into_iter()
            .map(|(label, count)| CountBucket::new(label, count, total))
            .collect();

        let mut by_purpose: Vec<CountBucket> = purposes
            .into_iter()
            .map(|(label, count)| CountBucket::new(label, count, total))
            .collect();
        // Ties are ordered by label so the output is stable.
        by_purpose.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        Self {
            total_visits: total,
            currently_checked_in,
            unique_visitors,
            average_duration_minutes,
            by_hour,
            by_month,
            by_purpose,
        }
    }

    pub fn into_dto(self) -> VisitorAnalyticsDto {
        VisitorAnalyticsDto {
            total_visits: self.total_visits,
            currently_checked_in: self.currently_checked_in,
            unique_visitors: self.unique_visitors,
            average_duration_minutes: self.average_duration_minutes,
            by_hour: self.by_hour.into_iter().map(CountBucket::into_dto).collect(),
            by_month: self.by_month.into_iter().map(CountBucket::into_dto).collect(),
            by_purpose: self.by_purpose.into_iter().map(CountBucket::into_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn visit(
        name: &str,
        phone: Option<&str>,
        purpose: &str,
        check_in: DateTime<Utc>,
        minutes: Option<i64>,
    ) -> VisitorLog {
        VisitorLog {
            id: 0,
            organization_id: 1,
            building_id: 1,
            host_tenant_id: None,
            visitor_name: name.to_string(),
            visitor_phone: phone.map(str::to_string),
            purpose: purpose.to_string(),
            vehicle_plate: None,
            check_in,
            check_out: minutes.map(|m| check_in + Duration::minutes(m)),
            status: if minutes.is_some() {
                VisitStatus::CheckedOut
            } else {
                VisitStatus::CheckedIn
            },
        }
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let analytics = VisitorAnalytics::from_visits(&[]);

        assert_eq!(analytics.total_visits, 0);
        assert_eq!(analytics.average_duration_minutes, None);
        assert_eq!(analytics.by_hour.len(), 24);
        assert!(analytics.by_hour.iter().all(|b| b.percentage == 0.0));
        assert!(analytics.by_month.is_empty());
        assert!(analytics.by_purpose.is_empty());
    }

    #[test]
    fn aggregates_by_hour_month_and_purpose() {
        let visits = vec![
            visit("Abebe", Some("0911"), "delivery", Utc.with_ymd_and_hms(2026, 4, 30, 9, 15, 0).unwrap(), Some(30)),
            visit("Abebe K.", Some("0911"), "guest", Utc.with_ymd_and_hms(2026, 5, 1, 9, 45, 0).unwrap(), Some(90)),
            visit("Sara", None, "delivery", Utc.with_ymd_and_hms(2026, 5, 2, 14, 0, 0).unwrap(), None),
        ];

        let analytics = VisitorAnalytics::from_visits(&visits);

        assert_eq!(analytics.total_visits, 3);
        assert_eq!(analytics.currently_checked_in, 1);
        assert_eq!(analytics.unique_visitors, 2);
        assert_eq!(analytics.average_duration_minutes, Some(60.0));

        assert_eq!(analytics.by_hour[9].label, "09");
        assert_eq!(analytics.by_hour[9].count, 2);
        assert_eq!(analytics.by_hour[9].percentage, 66.67);
        assert_eq!(analytics.by_hour[14].count, 1);

        let months: Vec<_> = analytics.by_month.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(months, vec!["2026-04", "2026-05"]);
        assert_eq!(analytics.by_month[1].count, 2);

        assert_eq!(analytics.by_purpose[0].label, "delivery");
        assert_eq!(analytics.by_purpose[0].count, 2);
        assert_eq!(analytics.by_purpose[1].label, "guest");
        assert_eq!(analytics.by_purpose[1].percentage, 33.33);
    }
}
