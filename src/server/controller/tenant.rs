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
        tenant::{TenantDto, TenantFilterParams, TenantInputDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            tenant::{Tenant, TenantParams},
        },
        service::tenant::TenantService,
        state::AppState,
    },
};

/// Tag for grouping tenant endpoints in OpenAPI documentation
pub static TENANT_TAG: &str = "tenant";

/// Register a tenant.
///
/// The phone is normalized and must be unique within the organization.
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = TENANT_TAG,
    request_body = TenantInputDto,
    responses(
        (status = 201, description = "Tenant created", body = TenantDto),
        (status = 400, description = "Invalid tenant data", body = ErrorDto),
        (status = 409, description = "Phone already registered", body = ErrorDto)
    ),
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<TenantInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let tenant = TenantService::new(&state.db)
        .create(TenantParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(tenant.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/tenants",
    tag = TENANT_TAG,
    params(PaginationParams, TenantFilterParams),
    responses(
        (status = 200, description = "Page of tenants", body = PaginatedDto<TenantDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_tenants(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<TenantFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let tenants = TenantService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter.status,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(tenants.into_dto(Tenant::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/tenants/{id}",
    tag = TENANT_TAG,
    params(("id" = i32, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant", body = TenantDto),
        (status = 404, description = "Tenant not found", body = ErrorDto)
    ),
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let tenant = TenantService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(tenant.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/tenants/{id}",
    tag = TENANT_TAG,
    params(("id" = i32, Path, description = "Tenant ID")),
    request_body = TenantInputDto,
    responses(
        (status = 200, description = "Tenant updated", body = TenantDto),
        (status = 400, description = "Invalid tenant data", body = ErrorDto),
        (status = 404, description = "Tenant not found", body = ErrorDto),
        (status = 409, description = "Phone already registered", body = ErrorDto)
    ),
)]
pub async fn update_tenant(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<TenantInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    let tenant = TenantService::new(&state.db)
        .update(id, TenantParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::OK, Json(tenant.into_dto())))
}

/// Delete a tenant with no lease or billing history.
#[utoipa::path(
    delete,
    path = "/api/tenants/{id}",
    tag = TENANT_TAG,
    params(("id" = i32, Path, description = "Tenant ID")),
    responses(
        (status = 204, description = "Tenant deleted"),
        (status = 404, description = "Tenant not found", body = ErrorDto),
        (status = 409, description = "Tenant has leases or invoices", body = ErrorDto)
    ),
)]
pub async fn delete_tenant(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageTenants])
        .await?;

    TenantService::new(&state.db)
        .delete(ctx.organization_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
