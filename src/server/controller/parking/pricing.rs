use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use super::PARKING_TAG;
use crate::{
    model::{
        api::ErrorDto,
        parking::{ParkingPricingDto, SetParkingPricingDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::parking::{ParkingPricing, SetParkingPricingParams},
        service::parking::pricing::ParkingPricingService,
        state::AppState,
    },
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PricingFilterParams {
    /// Only list the pricing in effect for each space type (default: false)
    #[serde(default)]
    pub active_only: bool,
}

/// Set the rates for a space type.
///
/// The previous active pricing for the type is deactivated and kept.
#[utoipa::path(
    put,
    path = "/api/parking/pricing",
    tag = PARKING_TAG,
    request_body = SetParkingPricingDto,
    responses(
        (status = 200, description = "Active pricing", body = ParkingPricingDto),
        (status = 400, description = "Negative rate", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn set_pricing(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SetParkingPricingDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let pricing = ParkingPricingService::new(&state.db)
        .set(SetParkingPricingParams {
            organization_id: ctx.organization_id,
            space_type: payload.space_type,
            hourly_rate: payload.hourly_rate,
            daily_rate: payload.daily_rate,
            monthly_rate: payload.monthly_rate,
        })
        .await?;

    Ok((StatusCode::OK, Json(pricing.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/parking/pricing",
    tag = PARKING_TAG,
    params(PricingFilterParams),
    responses(
        (status = 200, description = "Parking pricings", body = Vec<ParkingPricingDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_pricing(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<PricingFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageParking])
        .await?;

    let pricings: Vec<_> = ParkingPricingService::new(&state.db)
        .get_all(ctx.organization_id, filter.active_only)
        .await?
        .into_iter()
        .map(ParkingPricing::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(pricings)))
}
