use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use super::PARKING_TAG;
use crate::{
    model::{
        api::{BulkCreateResultDto, ErrorDto, PaginatedDto, PaginationParams},
        parking::{
            BulkCreateParkingSpacesDto, CreateParkingSpaceDto, ParkingSpaceDto,
            ParkingSpaceFilterParams, UpdateParkingSpaceDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            parking::{
                CreateParkingSpaceParams, ParkingSpace, ParkingSpaceFilter,
                UpdateParkingSpaceParams,
            },
        },
        service::parking::space::ParkingSpaceService,
        state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/api/parking/spaces",
    tag = PARKING_TAG,
    request_body = CreateParkingSpaceDto,
    responses(
        (status = 201, description = "Parking space created", body = ParkingSpaceDto),
        (status = 400, description = "Invalid space data", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 409, description = "Space number already exists", body = ErrorDto)
    ),
)]
pub async fn create_space(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateParkingSpaceDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let space = ParkingSpaceService::new(&state.db)
        .create(CreateParkingSpaceParams {
            organization_id: ctx.organization_id,
            building_id: payload.building_id,
            space_number: payload.space_number,
            space_type: payload.space_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(space.into_dto())))
}

/// Create many spaces of one type in a building, all or nothing.
#[utoipa::path(
    post,
    path = "/api/parking/spaces/bulk",
    tag = PARKING_TAG,
    request_body = BulkCreateParkingSpacesDto,
    responses(
        (status = 201, description = "Parking spaces created", body = BulkCreateResultDto),
        (status = 400, description = "A space number is blank", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 409, description = "Duplicate space number", body = ErrorDto)
    ),
)]
pub async fn bulk_create_spaces(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BulkCreateParkingSpacesDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let created = ParkingSpaceService::new(&state.db)
        .create_many(
            ctx.organization_id,
            payload.building_id,
            payload.space_type,
            payload.space_numbers,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResultDto {
            created: created.len() as u64,
            ids: created.iter().map(|space| space.id).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/parking/spaces",
    tag = PARKING_TAG,
    params(PaginationParams, ParkingSpaceFilterParams),
    responses(
        (status = 200, description = "Page of parking spaces", body = PaginatedDto<ParkingSpaceDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_spaces(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ParkingSpaceFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let filter = ParkingSpaceFilter {
        building_id: filter.building_id,
        status: filter.status,
    };
    let spaces = ParkingSpaceService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(spaces.into_dto(ParkingSpace::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/parking/spaces/{id}",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Parking space ID")),
    responses(
        (status = 200, description = "Parking space", body = ParkingSpaceDto),
        (status = 404, description = "Parking space not found", body = ErrorDto)
    ),
)]
pub async fn get_space(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let space = ParkingSpaceService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/parking/spaces/{id}",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Parking space ID")),
    request_body = UpdateParkingSpaceDto,
    responses(
        (status = 200, description = "Parking space updated", body = ParkingSpaceDto),
        (status = 400, description = "Invalid space data", body = ErrorDto),
        (status = 404, description = "Parking space not found", body = ErrorDto),
        (status = 409, description = "Duplicate number or occupancy change", body = ErrorDto)
    ),
)]
pub async fn update_space(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateParkingSpaceDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let space = ParkingSpaceService::new(&state.db)
        .update(UpdateParkingSpaceParams {
            id,
            organization_id: ctx.organization_id,
            space_number: payload.space_number,
            space_type: payload.space_type,
            status: payload.status,
        })
        .await?;

    Ok((StatusCode::OK, Json(space.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/parking/spaces/{id}",
    tag = PARKING_TAG,
    params(("id" = i32, Path, description = "Parking space ID")),
    responses(
        (status = 204, description = "Parking space deleted"),
        (status = 404, description = "Parking space not found", body = ErrorDto),
        (status = 409, description = "Space occupied or has assignment history", body = ErrorDto)
    ),
)]
pub async fn delete_space(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    ParkingSpaceService::new(&state.db)
        .delete(ctx.organization_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
