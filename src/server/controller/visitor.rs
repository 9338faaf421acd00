use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationParams},
        visitor::{
            CheckInDto, CheckOutDto, VisitorAnalyticsDto, VisitorAnalyticsParams, VisitorLogDto,
            VisitorLogFilterParams,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            visitor_log::{CheckInParams, VisitorLog, VisitorLogFilter},
        },
        service::visitor_log::VisitorLogService,
        state::AppState,
    },
};

/// Tag for grouping visitor endpoints in OpenAPI documentation
pub static VISITOR_TAG: &str = "visitor";

/// Check a visitor in at a building.
///
/// Phone and plate are normalized; a host tenant, when given, must belong to the
/// organization.
#[utoipa::path(
    post,
    path = "/api/visitors",
    tag = VISITOR_TAG,
    request_body = CheckInDto,
    responses(
        (status = 201, description = "Visitor checked in", body = VisitorLogDto),
        (status = 400, description = "Missing name or purpose", body = ErrorDto),
        (status = 404, description = "Building or host tenant not found", body = ErrorDto)
    ),
)]
pub async fn check_in(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckInDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageVisitors])
        .await?;

    let visit = VisitorLogService::new(&state.db)
        .check_in(CheckInParams {
            organization_id: ctx.organization_id,
            building_id: payload.building_id,
            host_tenant_id: payload.host_tenant_id,
            visitor_name: payload.visitor_name,
            visitor_phone: payload.visitor_phone,
            purpose: payload.purpose,
            vehicle_plate: payload.vehicle_plate,
            check_in: payload.check_in.unwrap_or_else(Utc::now),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(visit.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/visitors/{id}/check-out",
    tag = VISITOR_TAG,
    params(("id" = i32, Path, description = "Visit ID")),
    request_body = CheckOutDto,
    responses(
        (status = 200, description = "Visitor checked out", body = VisitorLogDto),
        (status = 400, description = "Check-out before check-in", body = ErrorDto),
        (status = 404, description = "Visit not found", body = ErrorDto),
        (status = 409, description = "Visitor already checked out", body = ErrorDto)
    ),
)]
pub async fn check_out(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CheckOutDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageVisitors])
        .await?;

    let visit = VisitorLogService::new(&state.db)
        .check_out(
            ctx.organization_id,
            id,
            payload.check_out.unwrap_or_else(Utc::now),
        )
        .await?;

    Ok((StatusCode::OK, Json(visit.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/visitors",
    tag = VISITOR_TAG,
    params(PaginationParams, VisitorLogFilterParams),
    responses(
        (status = 200, description = "Page of visits, latest first", body = PaginatedDto<VisitorLogDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_visits(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<VisitorLogFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageVisitors])
        .await?;

    let filter = VisitorLogFilter {
        building_id: filter.building_id,
        status: filter.status,
        from: filter.from,
        to: filter.to,
    };
    let visits = VisitorLogService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(visits.into_dto(VisitorLog::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/visitors/{id}",
    tag = VISITOR_TAG,
    params(("id" = i32, Path, description = "Visit ID")),
    responses(
        (status = 200, description = "Visit", body = VisitorLogDto),
        (status = 404, description = "Visit not found", body = ErrorDto)
    ),
)]
pub async fn get_visit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageVisitors])
        .await?;

    let visit = VisitorLogService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(visit.into_dto())))
}

/// Visit statistics over a check-in time range.
///
/// Includes unique visitors, the average length of completed visits, and counts with
/// percentages per hour of day, per month and per purpose.
#[utoipa::path(
    get,
    path = "/api/visitors/analytics",
    tag = VISITOR_TAG,
    params(VisitorAnalyticsParams),
    responses(
        (status = 200, description = "Visitor analytics", body = VisitorAnalyticsDto),
        (status = 400, description = "Range end before its start", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<VisitorAnalyticsParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageVisitors])
        .await?;

    let analytics = VisitorLogService::new(&state.db)
        .analytics(ctx.organization_id, params.from, params.to, params.building_id)
        .await?;

    Ok((StatusCode::OK, Json(analytics.into_dto())))
}
