use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationParams},
        billing::{PaymentDto, PaymentFilterParams, RecordPaymentDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::clamp_per_page,
            payment::{Payment, PaymentFilter, RecordPaymentParams},
        },
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

/// Record a payment received outside the online providers.
///
/// The amount must be positive and no more than the invoice balance. Paying the full
/// balance marks the invoice paid and cancels its pending payment intents.
///
/// # Returns
/// - `201 Created` - Recorded payment
/// - `400 Bad Request` - Amount not positive or above the balance
/// - `404 Not Found` - Invoice not in the organization
/// - `409 Conflict` - Invoice cancelled or already paid
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    request_body = RecordPaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentDto),
        (status = 400, description = "Invalid amount", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 409, description = "Invoice does not accept payments", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_payment(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RecordPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let params = RecordPaymentParams::from_dto(ctx.organization_id, ctx.user.id, payload);
    let payment = PaymentService::new(&state.db)
        .record(params, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    params(PaginationParams, PaymentFilterParams),
    responses(
        (status = 200, description = "Page of payments", body = PaginatedDto<PaymentDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_payments(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<PaymentFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewBilling])
        .await?;

    let filter = PaymentFilter {
        invoice_id: filter.invoice_id,
        tenant_id: filter.tenant_id,
        method: filter.method,
    };
    let payments = PaymentService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(payments.into_dto(Payment::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment", body = PaymentDto),
        (status = 404, description = "Payment not found", body = ErrorDto)
    ),
)]
pub async fn get_payment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewBilling])
        .await?;

    let payment = PaymentService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

/// Void a payment and take its amount back off the invoice.
#[utoipa::path(
    post,
    path = "/api/payments/{id}/void",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment voided", body = PaymentDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 409, description = "Payment already voided", body = ErrorDto)
    ),
)]
pub async fn void_payment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let payment = PaymentService::new(&state.db)
        .void(ctx.organization_id, id, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}
