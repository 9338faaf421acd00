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
            CreateParkingViolationDto, ParkingViolationDto, ParkingViolationFilterParams,
            ResolveParkingViolationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            parking::{CreateParkingViolationParams, ParkingViolation, ParkingViolationFilter},
        },
        service::parking::violation::ParkingViolationService,
        state::AppState,
        util::normalize::optional_text,
    },
};

#[utoipa::path(
    post,
    path = "/api/parking/violations",
    tag = PARKING_TAG,
    request_body = CreateParkingViolationDto,
    responses(
        (status = 201, description = "Violation issued", body = ParkingViolationDto),
        (status = 400, description = "Invalid violation data", body = ErrorDto),
        (status = 404, description = "Parking space not found", body = ErrorDto)
    ),
)]
pub async fn issue_violation(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateParkingViolationDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let violation = ParkingViolationService::new(&state.db)
        .issue(CreateParkingViolationParams {
            organization_id: ctx.organization_id,
            space_id: payload.space_id,
            vehicle_plate: payload.vehicle_plate,
            violation_type: payload.violation_type,
            fine_amount: payload.fine_amount,
            notes: optional_text(payload.notes),
            issued_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(violation.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/parking/violations",
    tag = PARKING_TAG,
    params(PaginationParams, ParkingViolationFilterParams),
    responses(
        (status = 200, description = "Page of violations", body = PaginatedDto<ParkingViolationDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_violations(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ParkingViolationFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let filter = ParkingViolationFilter {
        status: filter.status,
        vehicle_plate: filter.vehicle_plate,
    };
    let violations = ParkingViolationService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(violations.into_dto(ParkingViolation::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/parking/violations/{id}",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Violation ID")),
    responses(
        (status = 200, description = "Violation", body = ParkingViolationDto),
        (status = 404, description = "Violation not found", body = ErrorDto)
    ),
)]
pub async fn get_violation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let violation = ParkingViolationService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(violation.into_dto())))
}

/// Close an open violation as paid or dismissed.
#[utoipa::path(
    post,
    path = "/api/parking/violations/{id}/resolve",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Violation ID")),
    request_body = ResolveParkingViolationDto,
    responses(
        (status = 200, description = "Violation resolved", body = ParkingViolationDto),
        (status = 400, description = "Target status is open", body = ErrorDto),
        (status = 404, description = "Violation not found", body = ErrorDto),
        (status = 409, description = "Violation already resolved", body = ErrorDto)
    ),
)]
pub async fn resolve_violation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ResolveParkingViolationDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let violation = ParkingViolationService::new(&state.db)
        .resolve(ctx.organization_id, id, payload.status, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(violation.into_dto())))
}
