use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationParams},
        billing::{
            CreateInvoiceDto, GenerateInvoicesDto, GenerateInvoicesResultDto, InvoiceDto,
            InvoiceFilterParams, UpdateInvoiceDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            invoice::{Invoice, InvoiceFilter, InvoiceItemParams, NewInvoice, UpdateInvoiceParams},
            page::clamp_per_page,
        },
        service::invoice::InvoiceService,
        state::AppState,
        util::{normalize::optional_text, period::BillingPeriod},
    },
};

/// Tag for grouping invoice endpoints in OpenAPI documentation
pub static INVOICE_TAG: &str = "invoice";

#[derive(Serialize, ToSchema)]
pub struct MarkOverdueResultDto {
    pub updated: u64,
}

/// Create a manual invoice.
///
/// Items are priced as `quantity × unit_price`. The invoice number is assigned from the
/// issue month as `INV-YYYYMM-NNNN`.
///
/// # Access Control
/// - `ManageBilling` - Org admins and accountants
///
/// # Returns
/// - `201 Created` - Invoice with its items
/// - `400 Bad Request` - No items, invalid item or due date before issue date
/// - `404 Not Found` - Tenant or lease not in the organization
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = INVOICE_TAG,
    request_body = CreateInvoiceDto,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceDto),
        (status = 400, description = "Invalid invoice data", body = ErrorDto),
        (status = 404, description = "Tenant or lease not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateInvoiceDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let today = Utc::now().date_naive();
    let new = NewInvoice {
        organization_id: ctx.organization_id,
        tenant_id: payload.tenant_id,
        lease_id: payload.lease_id,
        issue_date: payload.issue_date.unwrap_or(today),
        due_date: payload.due_date,
        notes: optional_text(payload.notes),
        items: payload
            .items
            .into_iter()
            .map(InvoiceItemParams::from_dto)
            .collect(),
    };

    let invoice = InvoiceService::new(&state.db).create(new, today).await?;

    Ok((StatusCode::CREATED, Json(invoice.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = INVOICE_TAG,
    params(PaginationParams, InvoiceFilterParams),
    responses(
        (status = 200, description = "Page of invoices", body = PaginatedDto<InvoiceDto>),
        (status = 400, description = "Invalid period", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_invoices(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<InvoiceFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewBilling])
        .await?;

    let filter = InvoiceFilter {
        status: filter.status,
        tenant_id: filter.tenant_id,
        period: optional_text(filter.period),
    };
    let invoices = InvoiceService::new(&state.db)
        .get_paginated(
            ctx.organization_id,
            filter,
            params.page,
            clamp_per_page(params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(invoices.into_dto(Invoice::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice with items", body = InvoiceDto),
        (status = 404, description = "Invoice not found", body = ErrorDto)
    ),
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ViewBilling])
        .await?;

    let invoice = InvoiceService::new(&state.db)
        .get(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(invoice.into_dto())))
}

/// Replace an invoice's items, due date and notes.
///
/// Only allowed while nothing has been paid and the invoice is not cancelled.
#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = i32, Path, description = "Invoice ID")),
    request_body = UpdateInvoiceDto,
    responses(
        (status = 200, description = "Invoice updated", body = InvoiceDto),
        (status = 400, description = "Invalid invoice data", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 409, description = "Invoice is cancelled or has payments", body = ErrorDto)
    ),
)]
pub async fn update_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInvoiceDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let params = UpdateInvoiceParams {
        id,
        organization_id: ctx.organization_id,
        due_date: payload.due_date,
        notes: optional_text(payload.notes),
        items: payload
            .items
            .into_iter()
            .map(InvoiceItemParams::from_dto)
            .collect(),
    };

    let invoice = InvoiceService::new(&state.db)
        .update(params, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(invoice.into_dto())))
}

/// Cancel an unpaid invoice. Pending payment intents for it are cancelled as well.
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/cancel",
    tag = INVOICE_TAG,
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice cancelled", body = InvoiceDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 409, description = "Invoice already cancelled or has payments", body = ErrorDto)
    ),
)]
pub async fn cancel_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let invoice = InvoiceService::new(&state.db)
        .cancel(ctx.organization_id, id)
        .await?;

    Ok((StatusCode::OK, Json(invoice.into_dto())))
}

/// Generate rent invoices for a billing period.
///
/// Every active lease overlapping the period that has no invoice for it yet gets one,
/// including the tenant's monthly parking. Running it again only reports skips.
///
/// # Returns
/// - `200 OK` - Generated and skipped counts
/// - `400 Bad Request` - Period not formatted `YYYY-MM` or negative due days
#[utoipa::path(
    post,
    path = "/api/invoices/generate",
    tag = INVOICE_TAG,
    request_body = GenerateInvoicesDto,
    responses(
        (status = 200, description = "Generation result", body = GenerateInvoicesResultDto),
        (status = 400, description = "Invalid period", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_invoices(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<GenerateInvoicesDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let period = BillingPeriod::parse(&payload.period)?;
    let due_days = payload.due_days.unwrap_or(state.billing.invoice_due_days);

    let result = InvoiceService::new(&state.db)
        .generate_monthly(
            ctx.organization_id,
            period,
            due_days,
            Utc::now().date_naive(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(GenerateInvoicesResultDto {
            period: result.period,
            generated: result.generated,
            skipped: result.skipped,
            invoice_ids: result.invoice_ids,
        }),
    ))
}

/// Mark the organization's pending and partially paid invoices past their due date as
/// overdue.
#[utoipa::path(
    post,
    path = "/api/invoices/mark-overdue",
    tag = INVOICE_TAG,
    responses(
        (status = 200, description = "Number of invoices marked overdue", body = MarkOverdueResultDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn mark_overdue(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_org(&[Permission::ManageBilling])
        .await?;

    let updated = InvoiceService::new(&state.db)
        .mark_overdue(Some(ctx.organization_id), Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(MarkOverdueResultDto { updated })))
}
