use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::visitor::VisitStatus,
    server::{
        data::{building::BuildingRepository, tenant::TenantRepository, visitor_log::VisitorLogRepository},
        error::AppError,
        model::{
            page::Page,
            visitor_log::{CheckInParams, VisitorAnalytics, VisitorLog, VisitorLogFilter},
        },
        util::normalize::{non_empty, normalize_phone, normalize_plate},
    },
};

pub struct VisitorLogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VisitorLogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a visitor arriving at a building.
    ///
    /// # Returns
    /// - `Ok(VisitorLog)` - Checked-in visit
    /// - `Err(AppError::NotFound)` - Building or host tenant not in the organization
    /// - `Err(AppError::BadRequest)` - Missing visitor name or purpose
    pub async fn check_in(&self, mut params: CheckInParams) -> Result<VisitorLog, AppError> {
        params.visitor_name = non_empty(&params.visitor_name)
            .ok_or_else(|| AppError::BadRequest("Visitor name is required".to_string()))?;
        params.purpose = non_empty(&params.purpose)
            .ok_or_else(|| AppError::BadRequest("Visit purpose is required".to_string()))?;
        params.visitor_phone = params
            .visitor_phone
            .map(|phone| normalize_phone(&phone))
            .filter(|phone| !phone.is_empty());
        params.vehicle_plate = params
            .vehicle_plate
            .map(|plate| normalize_plate(&plate))
            .filter(|plate| !plate.is_empty());

        BuildingRepository::new(self.db)
            .find_in_organization(params.organization_id, params.building_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Building {} not found", params.building_id))
            })?;

        if let Some(tenant_id) = params.host_tenant_id {
            TenantRepository::new(self.db)
                .find_in_organization(params.organization_id, tenant_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", tenant_id)))?;
        }

        let visit = VisitorLogRepository::new(self.db).check_in(params).await?;

        tracing::info!(
            "Checked in visitor {} to building {}",
            visit.visitor_name,
            visit.building_id
        );

        Ok(visit)
    }

    pub async fn check_out(
        &self,
        organization_id: i32,
        id: i32,
        check_out: DateTime<Utc>,
    ) -> Result<VisitorLog, AppError> {
        let visit = self.get(organization_id, id).await?;
        if visit.status != VisitStatus::CheckedIn {
            return Err(AppError::Conflict(format!(
                "Visitor {} has already checked out",
                visit.visitor_name
            )));
        }
        if check_out < visit.check_in {
            return Err(AppError::BadRequest(
                "Check-out cannot be before check-in".to_string(),
            ));
        }

        VisitorLogRepository::new(self.db)
            .check_out(visit.id, check_out)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get(&self, organization_id: i32, id: i32) -> Result<VisitorLog, AppError> {
        VisitorLogRepository::new(self.db)
            .find_in_organization(organization_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_paginated(
        &self,
        organization_id: i32,
        filter: VisitorLogFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<VisitorLog>, AppError> {
        let result = VisitorLogRepository::new(self.db)
            .get_paginated(organization_id, filter, page, per_page)
            .await?;

        Ok(Page::new(result, page, per_page))
    }

    /// Visit statistics for check-ins between `from` and `to`, optionally for one building.
    pub async fn analytics(
        &self,
        organization_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        building_id: Option<i32>,
    ) -> Result<VisitorAnalytics, AppError> {
        if to < from {
            return Err(AppError::BadRequest(
                "Range end cannot be before its start".to_string(),
            ));
        }

        let visits = VisitorLogRepository::new(self.db)
            .get_all(
                organization_id,
                VisitorLogFilter {
                    building_id,
                    status: None,
                    from: Some(from),
                    to: Some(to),
                },
            )
            .await?;

        Ok(VisitorAnalytics::from_visits(&visits))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Visit {} not found", id))
}
