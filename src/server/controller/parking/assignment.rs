use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use super::PARKING_TAG;
use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationParams},
        parking::{
            CreateParkingAssignmentDto, EndParkingAssignmentDto, ParkingAssignmentDto,
            ParkingAssignmentFilterParams, ParkingChargeEstimateDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            parking::{CreateParkingAssignmentParams, ParkingAssignment, ParkingAssignmentFilter},
        },
        service::parking::assignment::ParkingAssignmentService,
        state::AppState,
    },
};

/// Park a vehicle in an available space.
///
/// # Returns
/// - `201 Created` - Active assignment; the space becomes occupied
/// - `400 Bad Request` - Missing plate, no pricing for the space type, or monthly without tenant
/// - `404 Not Found` - Space or tenant not in the organization
/// - `409 Conflict` - Space not available
#[utoipa::path(
    post,
    path = "/api/parking/assignments",
    tag = PARKING_TAG,
    request_body = CreateParkingAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = ParkingAssignmentDto),
        (status = 400, description = "Invalid assignment data", body = ErrorDto),
        (status = 404, description = "Space or tenant not found", body = ErrorDto),
        (status = 409, description = "Space not available", body = ErrorDto)
    ),
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateParkingAssignmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let assignment = ParkingAssignmentService::new(&state.db)
        .create(CreateParkingAssignmentParams {
            organization_id: ctx.organization_id,
            space_id: payload.space_id,
            tenant_id: payload.tenant_id,
            vehicle_plate: payload.vehicle_plate,
            assignment_type: payload.assignment_type,
            start_time: payload.start_time.unwrap_or_else(Utc::now),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(assignment.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/parking/assignments",
    tag = PARKING_TAG,
    params(PaginationParams, ParkingAssignmentFilterParams),
    responses(
        (status = 200, description = "Page of assignments", body = PaginatedDto<ParkingAssignmentDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_assignments(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ParkingAssignmentFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let filter = ParkingAssignmentFilter {
        status: filter.status,
        space_id: filter.space_id,
        tenant_id: filter.tenant_id,
    };
    let assignments = ParkingAssignmentService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(assignments.into_dto(ParkingAssignment::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/parking/assignments/{id}",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment", body = ParkingAssignmentDto),
        (status = 404, description = "Assignment not found", body = ErrorDto)
    ),
)]
pub async fn get_assignment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let assignment = ParkingAssignmentService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(assignment.into_dto())))
}

/// End an active assignment, charge it and free the space.
///
/// Hourly and daily stays of a tenant are billed on a new invoice referenced by the
/// assignment.
#[utoipa::path(
    post,
    path = "/api/parking/assignments/{id}/end",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = EndParkingAssignmentDto,
    responses(
        (status = 200, description = "Assignment completed", body = ParkingAssignmentDto),
        (status = 400, description = "End before start or no pricing", body = ErrorDto),
        (status = 404, description = "Assignment not found", body = ErrorDto),
        (status = 409, description = "Assignment not active", body = ErrorDto)
    ),
)]
pub async fn end_assignment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<EndParkingAssignmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let now = Utc::now();
    let assignment = ParkingAssignmentService::new(&state.db)
        .end(
            ctx.organization_id,
            id,
            payload.end_time.unwrap_or(now),
            state.billing.invoice_due_days,
            now.date_naive(),
        )
        .await?;

    Ok((StatusCode::OK, Json(assignment.into_dto())))
}

/// Charge of an active assignment if it ended now.
#[utoipa::path(
    get,
    path = "/api/parking/assignments/{id}/estimate",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Current charge", body = ParkingChargeEstimateDto),
        (status = 404, description = "Assignment not found", body = ErrorDto),
        (status = 409, description = "Assignment not active", body = ErrorDto)
    ),
)]
pub async fn estimate_assignment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let as_of = Utc::now();
    let charge = ParkingAssignmentService::new(&state.db)
        .estimate(ctx.organization_id, id, as_of)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ParkingChargeEstimateDto {
            assignment_id: id,
            billable_units: charge.units,
            rate: charge.rate,
            amount: charge.amount,
            as_of,
        }),
    ))
}
