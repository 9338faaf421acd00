use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{BulkCreateResultDto, ErrorDto, PaginatedDto, PaginationParams},
        property::{BulkCreateUnitsDto, CreateUnitDto, UnitDto, UnitFilterParams, UpdateUnitDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            unit::{CreateUnitParams, Unit, UnitFilter, UpdateUnitParams},
        },
        service::unit::UnitService,
        state::AppState,
    },
};

/// Tag for grouping unit endpoints in OpenAPI documentation
pub static UNIT_TAG: &str = "unit";

#[utoipa::path(
    post,
    path = "/api/units",
    tag = UNIT_TAG,
    request_body = CreateUnitDto,
    responses(
        (status = 201, description = "Unit created", body = UnitDto),
        (status = 400, description = "Invalid unit data", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 409, description = "Unit number already exists", body = ErrorDto)
    ),
)]
pub async fn create_unit(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateUnitDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let unit = UnitService::new(&state.db)
        .create(CreateUnitParams::from_dto(ctx.organization_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(unit.into_dto())))
}

/// Create many units in one building.
///
/// Every row is validated first, including duplicates inside the batch and against the
/// building's existing units; nothing is inserted if any row is rejected.
#[utoipa::path(
    post,
    path = "/api/units/bulk",
    tag = UNIT_TAG,
    request_body = BulkCreateUnitsDto,
    responses(
        (status = 201, description = "Units created", body = BulkCreateResultDto),
        (status = 400, description = "A row is invalid", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 409, description = "Duplicate unit number", body = ErrorDto)
    ),
)]
pub async fn bulk_create_units(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BulkCreateUnitsDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let building_id = payload.building_id;
    let units = payload
        .units
        .into_iter()
        .map(|dto| CreateUnitParams::from_bulk_dto(ctx.organization_id, building_id, dto))
        .collect();

    let created = UnitService::new(&state.db)
        .create_many(building_id, units)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResultDto {
            created: created.len() as u64,
            ids: created.iter().map(|unit| unit.id).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/units",
    tag = UNIT_TAG,
    params(PaginationParams, UnitFilterParams),
    responses(
        (status = 200, description = "Page of units", body = PaginatedDto<UnitDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_units(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<UnitFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let filter = UnitFilter {
        building_id: filter.building_id,
        status: filter.status,
    };
    let units = UnitService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(units.into_dto(Unit::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/units/{id}",
    tag = UNIT_TAG,
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit", body = UnitDto),
        (status = 404, description = "Unit not found", body = ErrorDto)
    ),
)]
pub async fn get_unit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let unit = UnitService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(unit.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/units/{id}",
    tag = UNIT_TAG,
    params(("id" = i32, Path, description = "Unit ID")),
    request_body = UpdateUnitDto,
    responses(
        (status = 200, description = "Unit updated", body = UnitDto),
        (status = 400, description = "Invalid unit data", body = ErrorDto),
        (status = 404, description = "Unit not found", body = ErrorDto),
        (status = 409, description = "Duplicate number or occupancy change", body = ErrorDto)
    ),
)]
pub async fn update_unit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUnitDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    let unit = UnitService::new(&state.db)
        .update(UpdateUnitParams::from_dto(ctx.organization_id, id, payload))
        .await?;

    Ok((StatusCode::OK, Json(unit.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    tag = UNIT_TAG,
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 204, description = "Unit deleted"),
        (status = 404, description = "Unit not found", body = ErrorDto),
        (status = 409, description = "Unit has lease history", body = ErrorDto)
    ),
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    UnitService::new(&state.db)
        .delete(ctx.organization_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
