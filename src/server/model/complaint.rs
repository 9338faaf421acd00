use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::maintenance::{ComplaintDto, ComplaintStatus, CreateComplaintDto, Priority},
    server::util::parse::parse_enum,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: i32,
    pub organization_id: i32,
    pub tenant_id: i32,
    pub unit_id: Option<i32>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    pub fn from_entity(entity: entity::complaint::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            tenant_id: entity.tenant_id,
            unit_id: entity.unit_id,
            category: entity.category,
            title: entity.title,
            description: entity.description,
            priority: parse_enum("complaint.priority", &entity.priority)?,
            status: parse_enum("complaint.status", &entity.status)?,
            resolution: entity.resolution,
            created_at: entity.created_at,
            resolved_at: entity.resolved_at,
        })
    }

    pub fn into_dto(self) -> ComplaintDto {
        ComplaintDto {
            id: self.id,
            tenant_id: self.tenant_id,
            unit_id: self.unit_id,
            category: self.category,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            resolution: self.resolution,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        }
    }
}

/// Whether a complaint may move from `from` to `to`. Closed complaints are final.
pub fn complaint_transition_allowed(from: ComplaintStatus, to: ComplaintStatus) -> bool {
    use ComplaintStatus::*;

    matches!(
        (from, to),
        (Open, InProgress | Resolved | Closed)
            | (InProgress, Resolved | Closed)
            | (Resolved, Closed | InProgress)
    )
}

#[derive(Debug, Clone)]
pub struct CreateComplaintParams {
    pub organization_id: i32,
    pub tenant_id: i32,
    pub unit_id: Option<i32>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl CreateComplaintParams {
    pub fn from_dto(organization_id: i32, dto: CreateComplaintDto) -> Self {
        Self {
            organization_id,
            tenant_id: dto.tenant_id,
            unit_id: dto.unit_id,
            category: dto.category.trim().to_string(),
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            priority: dto.priority,
        }
    }
}

/// New status and, when resolving, the resolution text and time.
#[derive(Debug, Clone)]
pub struct ComplaintStatusChange {
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub tenant_id: Option<i32>,
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    #[test]
    fn allowed_transitions() {
        assert!(complaint_transition_allowed(Open, InProgress));
        assert!(complaint_transition_allowed(Open, Closed));
        assert!(complaint_transition_allowed(InProgress, Resolved));
        assert!(complaint_transition_allowed(Resolved, InProgress));
        assert!(complaint_transition_allowed(Resolved, Closed));
    }

    #[test]
    fn rejected_transitions() {
        assert!(!complaint_transition_allowed(Open, Open));
        assert!(!complaint_transition_allowed(InProgress, Open));
        assert!(!complaint_transition_allowed(Resolved, Open));
        for to in [Open, InProgress, Resolved, Closed] {
            assert!(!complaint_transition_allowed(Closed, to));
        }
    }
}
