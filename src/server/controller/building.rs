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
        property::{BuildingDto, BuildingInputDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            building::{Building, BuildingParams},
            page::clamp_per_page,
        },
        service::building::BuildingService,
        state::AppState,
    },
};

/// Tag for grouping building endpoints in OpenAPI documentation
pub static BUILDING_TAG: &str = "building";

#[utoipa::path(
    post,
    path = "/api/buildings",
    tag = BUILDING_TAG,
    request_body = BuildingInputDto,
    responses(
        (status = 201, description = "Building created", body = BuildingDto),
        (status = 400, description = "Invalid building data", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_building(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BuildingInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let building = BuildingService::new(&state.db)
        .create(BuildingParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(building.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/buildings",
    tag = BUILDING_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of buildings", body = PaginatedDto<BuildingDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_buildings(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let buildings = BuildingService::new(&state.db)
        .get_paginated(ctx.organization_id, params.page, clamp_per_page(params.entries))
        .await?;

    Ok((StatusCode::OK, Json(buildings.into_dto(Building::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/buildings/{id}",
    tag = BUILDING_TAG,
    params(("id" = i32, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Building", body = BuildingDto),
        (status = 404, description = "Building not found", body = ErrorDto)
    ),
)]
pub async fn get_building(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let building = BuildingService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(building.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/buildings/{id}",
    tag = BUILDING_TAG,
    params(("id" = i32, Path, description = "Building ID")),
    request_body = BuildingInputDto,
    responses(
        (status = 200, description = "Building updated", body = BuildingDto),
        (status = 400, description = "Invalid building data", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto)
    ),
)]
pub async fn update_building(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<BuildingInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let building = BuildingService::new(&state.db)
        .update(id, BuildingParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::OK, Json(building.into_dto())))
}

/// Delete a building.
///
/// Rejected with `409 Conflict` while the building still has units or parking spaces.
#[utoipa::path(
    delete,
    path = "/api/buildings/{id}",
    tag = BUILDING_TAG,
    params(("id" = i32, Path, description = "Building ID")),
    responses(
        (status = 204, description = "Building deleted"),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 409, description = "Building still has units or parking spaces", body = ErrorDto)
    ),
)]
pub async fn delete_building(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    BuildingService::new(&state.db)
        .delete(ctx.organization_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
