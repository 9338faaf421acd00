use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        report::{DashboardDto, RevenueReportDto, RevenueReportParams},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::report::ReportService,
        state::AppState,
    },
};

/// Tag for grouping report endpoints in OpenAPI documentation
pub static REPORT_TAG: &str = "report";

/// Organization overview for today.
///
/// Unit occupancy, active leases and tenants, outstanding and overdue billing, revenue
/// received this month, open complaints and work orders, parking occupancy and today's
/// visitors.
#[utoipa::path(
    get,
    path = "/api/reports/dashboard",
    tag = REPORT_TAG,
    responses(
        (status = 200, description = "Dashboard", body = DashboardDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewReports])
        .await?;

    let dashboard = ReportService::new(&state.db)
        .dashboard(ctx.organization_id, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}

/// Completed payments between two days, grouped by month and by method.
#[utoipa::path(
    get,
    path = "/api/reports/revenue",
    tag = REPORT_TAG,
    params(RevenueReportParams),
    responses(
        (status = 200, description = "Revenue report", body = RevenueReportDto),
        (status = 400, description = "Range end before its start", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_revenue(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RevenueReportParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewReports])
        .await?;

    let report = ReportService::new(&state.db)
        .revenue(ctx.organization_id, params.from, params.to)
        .await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}
