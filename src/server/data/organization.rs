//! Organization data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::organization::OrganizationStatus,
    server::model::organization::{
        CreateOrganizationParams, Organization, UpdateOrganizationParams,
    },
};

pub struct OrganizationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrganizationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active organization.
    pub async fn create(&self, params: &CreateOrganizationParams) -> Result<Organization, DbErr> {
        let entity = entity::organization::ActiveModel {
            name: ActiveValue::Set(params.name.clone()),
            slug: ActiveValue::Set(params.slug.clone()),
            contact_email: ActiveValue::Set(params.contact_email.clone()),
            contact_phone: ActiveValue::Set(params.contact_phone.clone()),
            status: ActiveValue::Set(OrganizationStatus::Active.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Organization::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Organization>, DbErr> {
        entity::prelude::Organization::find_by_id(id)
            .one(self.db)
            .await?
            .map(Organization::from_entity)
            .transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DbErr> {
        entity::prelude::Organization::find()
            .filter(entity::organization::Column::Slug.eq(slug))
            .one(self.db)
            .await?
            .map(Organization::from_entity)
            .transpose()
    }

    /// Gets organizations ordered by name.
    ///
    /// # Returns
    /// - `Ok((organizations, total))` - Requested page and total organization count
    /// - `Err(DbErr)` - Database error
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Organization>, u64), DbErr> {
        let paginator = entity::prelude::Organization::find()
            .order_by_asc(entity::organization::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let organizations = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Organization::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((organizations, total))
    }

    /// Updates name and contact details. Returns `None` when the organization doesn't exist.
    pub async fn update(
        &self,
        params: UpdateOrganizationParams,
    ) -> Result<Option<Organization>, DbErr> {
        let Some(organization) = entity::prelude::Organization::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::organization::ActiveModel = organization.into();
        active_model.name = ActiveValue::Set(params.name);
        active_model.contact_email = ActiveValue::Set(params.contact_email);
        active_model.contact_phone = ActiveValue::Set(params.contact_phone);

        let entity = active_model.update(self.db).await?;

        Organization::from_entity(entity).map(Some)
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: OrganizationStatus,
    ) -> Result<Option<Organization>, DbErr> {
        let Some(organization) = entity::prelude::Organization::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::organization::ActiveModel = organization.into();
        active_model.status = ActiveValue::Set(status.to_string());

        let entity = active_model.update(self.db).await?;

        Organization::from_entity(entity).map(Some)
    }

    /// Ids of every active organization, used by the billing scheduler.
    pub async fn get_active_ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Organization::find()
            .select_only()
            .column(entity::organization::Column::Id)
            .filter(entity::organization::Column::Status.eq(OrganizationStatus::Active.to_string()))
            .order_by_asc(entity::organization::Column::Id)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
