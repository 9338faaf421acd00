use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::maintenance::ComplaintStatus,
    server::model::complaint::{
        Complaint, ComplaintFilter, ComplaintStatusChange, CreateComplaintParams,
    },
};

pub struct ComplaintRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ComplaintRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an open complaint.
    pub async fn create(&self, params: CreateComplaintParams) -> Result<Complaint, DbErr> {
        let entity = entity::complaint::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            tenant_id: ActiveValue::Set(params.tenant_id),
            unit_id: ActiveValue::Set(params.unit_id),
            category: ActiveValue::Set(params.category),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            priority: ActiveValue::Set(params.priority.to_string()),
            status: ActiveValue::Set(ComplaintStatus::Open.to_string()),
            resolution: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            resolved_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Complaint::from_entity(entity)
    }

    pub async fn find_in_organization(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<Complaint>, DbErr> {
        entity::prelude::Complaint::find_by_id(id)
            .filter(entity::complaint::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await?
            .map(Complaint::from_entity)
            .transpose()
    }

    /// Gets complaints newest first.
    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: ComplaintFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Complaint>, u64), DbErr> {
        let mut query = entity::prelude::Complaint::find()
            .filter(entity::complaint::Column::OrganizationId.eq(organization_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::complaint::Column::Status.eq(status.to_string()));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(entity::complaint::Column::TenantId.eq(tenant_id));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(entity::complaint::Column::Priority.eq(priority.to_string()));
        }

        let paginator = query
            .order_by_desc(entity::complaint::Column::CreatedAt)
            .order_by_desc(entity::complaint::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let complaints = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Complaint::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((complaints, total))
    }

    /// Applies a status change. Resolution fields are only overwritten when provided.
    pub async fn update_status(
        &self,
        id: i32,
        change: ComplaintStatusChange,
    ) -> Result<Option<Complaint>, DbErr> {
        let Some(complaint) = entity::prelude::Complaint::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::complaint::ActiveModel = complaint.into();
        active_model.status = ActiveValue::Set(change.status.to_string());
        if let Some(resolution) = change.resolution {
            active_model.resolution = ActiveValue::Set(Some(resolution));
        }
        if let Some(resolved_at) = change.resolved_at {
            active_model.resolved_at = ActiveValue::Set(Some(resolved_at));
        }

        let entity = active_model.update(self.db).await?;

        Complaint::from_entity(entity).map(Some)
    }

    /// Counts complaints that are neither resolved nor closed.
    pub async fn count_open(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Complaint::find()
            .filter(entity::complaint::Column::OrganizationId.eq(organization_id))
            .filter(entity::complaint::Column::Status.is_in([
                ComplaintStatus::Open.to_string(),
                ComplaintStatus::InProgress.to_string(),
            ]))
            .count(self.db)
            .await
    }

    pub async fn exists_for_tenant(&self, tenant_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Complaint::find()
            .filter(entity::complaint::Column::TenantId.eq(tenant_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
