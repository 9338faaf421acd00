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
            AssignWorkOrderDto, CreateWorkOrderDto, UpdateWorkOrderStatusDto, WorkOrderDto,
            WorkOrderFilterParams,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            work_order::{CreateWorkOrderParams, WorkOrder, WorkOrderFilter},
        },
        service::work_order::WorkOrderService,
        state::AppState,
    },
};

/// Tag for grouping work order endpoints in OpenAPI documentation
pub static WORK_ORDER_TAG: &str = "work_order";

#[utoipa::path(
    post,
    path = "/api/work-orders",
    tag = WORK_ORDER_TAG,
    request_body = CreateWorkOrderDto,
    responses(
        (status = 201, description = "Work order created", body = WorkOrderDto),
        (status = 400, description = "Invalid work order data", body = ErrorDto),
        (status = 404, description = "Building or unit not found", body = ErrorDto)
    ),
)]
pub async fn create_work_order(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateWorkOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageWorkOrders])
        .await?;

    let work_order = WorkOrderService::new(&state.db)
        .create(CreateWorkOrderParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(work_order.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/work-orders",
    tag = WORK_ORDER_TAG,
    params(PaginationParams, WorkOrderFilterParams),
    responses(
        (status = 200, description = "Page of work orders", body = PaginatedDto<WorkOrderDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_work_orders(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<WorkOrderFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageWorkOrders])
        .await?;

    let filter = WorkOrderFilter {
        status: filter.status,
        building_id: filter.building_id,
        assigned_to: filter.assigned_to,
    };
    let work_orders = WorkOrderService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(work_orders.into_dto(WorkOrder::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/work-orders/{id}",
    tag = WORK_ORDER_TAG,
    params(("id" = i32, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Work order", body = WorkOrderDto),
        (status = 404, description = "Work order not found", body = ErrorDto)
    ),
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageWorkOrders])
        .await?;

    let work_order = WorkOrderService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(work_order.into_dto())))
}

/// Assign a work order to an active staff member of the organization.
#[utoipa::path(
    post,
    path = "/api/work-orders/{id}/assign",
    tag = WORK_ORDER_TAG,
    params(("id" = i32, Path, description = "Work order ID")),
    request_body = AssignWorkOrderDto,
    responses(
        (status = 200, description = "Work order assigned", body = WorkOrderDto),
        (status = 400, description = "User is not active", body = ErrorDto),
        (status = 404, description = "Work order or user not found", body = ErrorDto),
        (status = 409, description = "Work order already started or closed", body = ErrorDto)
    ),
)]
pub async fn assign_work_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<AssignWorkOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageWorkOrders])
        .await?;

    let work_order = WorkOrderService::new(&state.db)
        .assign(ctx.organization_id, id, payload.user_id)
        .await?;

    Ok((StatusCode::OK, Json(work_order.into_dto())))
}

/// Move a work order along its lifecycle.
///
/// Completing an order created from a complaint also resolves the complaint.
#[utoipa::path(
    put,
    path = "/api/work-orders/{id}/status",
    tag = WORK_ORDER_TAG,
    params(("id" = i32, Path, description = "Work order ID")),
    request_body = UpdateWorkOrderStatusDto,
    responses(
        (status = 200, description = "Work order updated", body = WorkOrderDto),
        (status = 400, description = "Invalid status or cost", body = ErrorDto),
        (status = 404, description = "Work order not found", body = ErrorDto),
        (status = 409, description = "Transition not allowed", body = ErrorDto)
    ),
)]
pub async fn update_work_order_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWorkOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageWorkOrders])
        .await?;

    let work_order = WorkOrderService::new(&state.db)
        .update_status(
            ctx.organization_id,
            id,
            payload.status,
            payload.actual_cost,
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::OK, Json(work_order.into_dto())))
}
