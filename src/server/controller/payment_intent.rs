use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationParams},
        billing::{CreatePaymentIntentDto, PaymentIntentDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            payment_intent::{NewPaymentIntent, PaymentIntent},
        },
        service::payment_intent::PaymentIntentService,
        state::AppState,
    },
};

/// Tag for grouping payment intent endpoints in OpenAPI documentation
pub static PAYMENT_INTENT_TAG: &str = "payment_intent";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentIntentFilterParams {
    pub invoice_id: Option<i32>,
}

/// Start an online payment for an invoice.
///
/// The provider returns a checkout URL the tenant is sent to. Amount defaults to the
/// invoice balance.
///
/// # Returns
/// - `201 Created` - Pending intent with its checkout URL
/// - `400 Bad Request` - Amount not positive or above the balance
/// - `404 Not Found` - Invoice not in the organization
/// - `409 Conflict` - Invoice cancelled or already paid
/// - `502 Bad Gateway` - Provider rejected the request
#[utoipa::path(
    post,
    path = "/api/payment-intents",
    tag = PAYMENT_INTENT_TAG,
    request_body = CreatePaymentIntentDto,
    responses(
        (status = 201, description = "Payment intent created", body = PaymentIntentDto),
        (status = 400, description = "Invalid amount", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 409, description = "Invoice does not accept payments", body = ErrorDto),
        (status = 502, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreatePaymentIntentDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let intent = PaymentIntentService::new(&state.db, &state.providers)
        .create(
            NewPaymentIntent::from_dto(ctx.organization_id, payload),
            &state.billing.currency,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(intent.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/payment-intents",
    tag = PAYMENT_INTENT_TAG,
    params(PaginationParams, PaymentIntentFilterParams),
    responses(
        (status = 200, description = "Page of payment intents", body = PaginatedDto<PaymentIntentDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_payment_intents(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<PaymentIntentFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewBilling])
        .await?;

    let intents = PaymentIntentService::new(&state.db, &state.providers)
        .get_paginated(
            ctx.organization_id,
            filter.invoice_id,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(intents.into_dto(PaymentIntent::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/payment-intents/{id}",
    tag = PAYMENT_INTENT_TAG,
    params(("id" = i32, Path, description = "Payment intent ID")),
    responses(
        (status = 200, description = "Payment intent", body = PaymentIntentDto),
        (status = 404, description = "Payment intent not found", body = ErrorDto)
    ),
)]
pub async fn get_payment_intent(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewBilling])
        .await?;

    let intent = PaymentIntentService::new(&state.db, &state.providers)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(intent.into_dto())))
}

/// Verify a pending intent with its provider.
///
/// A successful verification records exactly one payment, however many times it is
/// confirmed. A failed one marks the intent failed.
#[utoipa::path(
    post,
    path = "/api/payment-intents/{id}/confirm",
    tag = PAYMENT_INTENT_TAG,
    params(("id" = i32, Path, description = "Payment intent ID")),
    responses(
        (status = 200, description = "Intent after verification", body = PaymentIntentDto),
        (status = 404, description = "Payment intent not found", body = ErrorDto),
        (status = 409, description = "Intent failed or cancelled", body = ErrorDto),
        (status = 502, description = "Payment provider error", body = ErrorDto)
    ),
)]
pub async fn confirm_payment_intent(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let now = Utc::now();
    let intent = PaymentIntentService::new(&state.db, &state.providers)
        .confirm(ctx.organization_id, id, now, now.date_naive())
        .await?;

    Ok((StatusCode::OK, Json(intent.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/payment-intents/{id}/cancel",
    tag = PAYMENT_INTENT_TAG,
    params(("id" = i32, Path, description = "Payment intent ID")),
    responses(
        (status = 200, description = "Intent cancelled", body = PaymentIntentDto),
        (status = 404, description = "Payment intent not found", body = ErrorDto),
        (status = 409, description = "Intent is no longer pending", body = ErrorDto)
    ),
)]
pub async fn cancel_payment_intent(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let intent = PaymentIntentService::new(&state.db, &state.providers)
        .cancel(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(intent.into_dto())))
}
