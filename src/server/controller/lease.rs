use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationParams},
        tenant::{CreateLeaseDto, LeaseDto, LeaseFilterParams, TerminateLeaseDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            lease::{CreateLeaseParams, Lease, LeaseFilter},
            page::clamp_per_page,
        },
        service::lease::LeaseService,
        state::AppState,
    },
};

/// Tag for grouping lease endpoints in OpenAPI documentation
pub static LEASE_TAG: &str = "lease";

/// Lease a vacant unit to a tenant.
///
/// The unit becomes occupied. Rent defaults to the unit's listed rent.
///
/// # Returns
/// - `201 Created` - Active lease
/// - `400 Bad Request` - Invalid dates, rent or deposit
/// - `404 Not Found` - Tenant or unit not in the organization
/// - `409 Conflict` - Unit occupied, under maintenance or already leased
#[utoipa::path(
    post,
    path = "/api/leases",
    tag = LEASE_TAG,
    request_body = CreateLeaseDto,
    responses(
        (status = 201, description = "Lease created", body = LeaseDto),
        (status = 400, description = "Invalid lease data", body = ErrorDto),
        (status = 404, description = "Tenant or unit not found", body = ErrorDto),
        (status = 409, description = "Unit not available", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_lease(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateLeaseDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let lease = LeaseService::new(&state.db)
        .create(CreateLeaseParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(lease.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/leases",
    tag = LEASE_TAG,
    params(PaginationParams, LeaseFilterParams),
    responses(
        (status = 200, description = "Page of leases", body = PaginatedDto<LeaseDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_leases(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<LeaseFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let filter = LeaseFilter {
        status: filter.status,
        tenant_id: filter.tenant_id,
        unit_id: filter.unit_id,
    };
    let leases = LeaseService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(leases.into_dto(Lease::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/leases/{id}",
    tag = LEASE_TAG,
    params(("id" = i32, Path, description = "Lease ID")),
    responses(
        (status = 200, description = "Lease", body = LeaseDto),
        (status = 404, description = "Lease not found", body = ErrorDto)
    ),
)]
pub async fn get_lease(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let lease = LeaseService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(lease.into_dto())))
}

/// Terminate an active lease early and free its unit.
#[utoipa::path(
    post,
    path = "/api/leases/{id}/terminate",
    tag = LEASE_TAG,
    params(("id" = i32, Path, description = "Lease ID")),
    request_body = TerminateLeaseDto,
    responses(
        (status = 200, description = "Lease terminated", body = LeaseDto),
        (status = 400, description = "Date outside the lease term", body = ErrorDto),
        (status = 404, description = "Lease not found", body = ErrorDto),
        (status = 409, description = "Lease is not active", body = ErrorDto)
    ),
)]
pub async fn terminate_lease(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<TerminateLeaseDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let lease = LeaseService::new(&state.db)
        .terminate(ctx.organization_id, id, payload.termination_date)
        .await?;

    Ok((StatusCode::OK, Json(lease.into_dto())))
}
