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
        maintenance::{
            ComplaintDto, ComplaintFilterParams, ConvertComplaintDto, CreateComplaintDto,
            UpdateComplaintStatusDto, WorkOrderDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            complaint::{Complaint, ComplaintFilter, CreateComplaintParams},
            page::clamp_per_page,
        },
        service::complaint::ComplaintService,
        state::AppState,
    },
};

/// Tag for grouping complaint endpoints in OpenAPI documentation
pub static COMPLAINT_TAG: &str = "complaint";

#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = COMPLAINT_TAG,
    request_body = CreateComplaintDto,
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintDto),
        (status = 400, description = "Missing title or category", body = ErrorDto),
        (status = 404, description = "Tenant or unit not found", body = ErrorDto)
    ),
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateComplaintDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageComplaints])
        .await?;

    let complaint = ComplaintService::new(&state.db)
        .create(CreateComplaintParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(complaint.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = COMPLAINT_TAG,
    params(PaginationParams, ComplaintFilterParams),
    responses(
        (status = 200, description = "Page of complaints", body = PaginatedDto<ComplaintDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_complaints(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ComplaintFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageComplaints])
        .await?;

    let filter = ComplaintFilter {
        status: filter.status,
        tenant_id: filter.tenant_id,
        priority: filter.priority,
    };
    let complaints = ComplaintService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(complaints.into_dto(Complaint::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint", body = ComplaintDto),
        (status = 404, description = "Complaint not found", body = ErrorDto)
    ),
)]
pub async fn get_complaint(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageComplaints])
        .await?;

    let complaint = ComplaintService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(complaint.into_dto())))
}

/// Move a complaint to a new status.
///
/// Allowed moves: `open` to `in_progress`, `resolved` or `closed`; `in_progress` to
/// `resolved` or `closed`; `resolved` to `closed` or back to `in_progress`. Closed
/// complaints are final. Resolving requires a resolution.
#[utoipa::path(
    put,
    path = "/api/complaints/{id}/status",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint ID")),
    request_body = UpdateComplaintStatusDto,
    responses(
        (status = 200, description = "Complaint updated", body = ComplaintDto),
        (status = 400, description = "Resolution missing", body = ErrorDto),
        (status = 404, description = "Complaint not found", body = ErrorDto),
        (status = 409, description = "Transition not allowed", body = ErrorDto)
    ),
)]
pub async fn update_complaint_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateComplaintStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageComplaints])
        .await?;

    let complaint = ComplaintService::new(&state.db)
        .update_status(
            ctx.organization_id,
            id,
            payload.status,
            payload.resolution,
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::OK, Json(complaint.into_dto())))
}

/// Open a work order for a complaint. The complaint moves to `in_progress`.
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/work-order",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint ID")),
    request_body = ConvertComplaintDto,
    responses(
        (status = 201, description = "Work order created", body = WorkOrderDto),
        (status = 400, description = "Negative estimated cost", body = ErrorDto),
        (status = 404, description = "Complaint or building not found", body = ErrorDto),
        (status = 409, description = "Complaint cannot move to in progress", body = ErrorDto)
    ),
)]
pub async fn convert_to_work_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ConvertComplaintDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageComplaints, Permission::ManageWorkOrders])
        .await?;

    let work_order = ComplaintService::new(&state.db)
        .convert_to_work_order(
            ctx.organization_id,
            id,
            payload.building_id,
            payload.estimated_cost,
            payload.due_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(work_order.into_dto())))
}
