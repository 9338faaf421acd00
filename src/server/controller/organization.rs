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
        organization::{
            CreateOrganizationDto, OrganizationDto, SetOrganizationStatusDto,
            UpdateOrganizationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            organization::{CreateOrganizationParams, Organization, UpdateOrganizationParams},
            page::clamp_per_page,
        },
        service::organization::OrganizationService,
        state::AppState,
    },
};

/// Tag for grouping organization endpoints in OpenAPI documentation
pub static ORGANIZATION_TAG: &str = "organization";

/// Create an organization together with its first org admin.
///
/// # Access Control
/// - `ManageOrganizations` - Platform super admins only
///
/// # Returns
/// - `201 Created` - Organization created
/// - `400 Bad Request` - Invalid slug or admin details
/// - `409 Conflict` - Slug already taken
#[utoipa::path(
    post,
    path = "/api/organizations",
    tag = ORGANIZATION_TAG,
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 400, description = "Invalid organization data", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 409, description = "Slug already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_organization(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageOrganizations])
        .await?;

    let (organization, _admin) = OrganizationService::new(&state.db)
        .create(CreateOrganizationParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(organization.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = ORGANIZATION_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of organizations", body = PaginatedDto<OrganizationDto>),
        (status = 403, description = "Not a super admin", body = ErrorDto)
    ),
)]
pub async fn get_organizations(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageOrganizations])
        .await?;

    let organizations = OrganizationService::new(&state.db)
        .get_paginated(params.page, clamp_per_page(params.entries))
        .await?;

    Ok((
        StatusCode::OK,
        Json(organizations.into_dto(Organization::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = OrganizationDto),
        (status = 404, description = "Organization not found", body = ErrorDto)
    ),
)]
pub async fn get_organization(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageOrganizations])
        .await?;

    let organization = OrganizationService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    request_body = UpdateOrganizationDto,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationDto),
        (status = 400, description = "Invalid organization data", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto)
    ),
)]
pub async fn update_organization(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageOrganizations])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .update(UpdateOrganizationParams::from_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}

/// Suspend or reactivate an organization.
///
/// Staff of a suspended organization are rejected by every authenticated endpoint.
#[utoipa::path(
    put,
    path = "/api/organizations/{id}/status",
    tag = ORGANIZATION_TAG,
    params(("id" = i32, Path, description = "Organization ID")),
    request_body = SetOrganizationStatusDto,
    responses(
        (status = 200, description = "Status updated", body = OrganizationDto),
        (status = 404, description = "Organization not found", body = ErrorDto)
    ),
)]
pub async fn set_organization_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetOrganizationStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageOrganizations])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .set_status(id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(organization.into_dto())))
}
