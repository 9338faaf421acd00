use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{BootstrapDto, LoginDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        service::auth::{AuthService, BootstrapParams, LoginParams},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Log in with phone and password.
///
/// Staff log in with their organization's slug; platform super admins omit it. On success
/// the session id is cycled and the user id stored in the session.
///
/// # Returns
/// - `200 OK` - Logged-in user
/// - `401 Unauthorized` - Unknown organization, phone or wrong password
/// - `403 Forbidden` - Account inactive or organization suspended
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account or organization blocked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .login(LoginParams {
            organization: payload.organization,
            phone: payload.phone,
            password: payload.password,
        })
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Clear the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged-in user.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Redeem the startup code to create the first super admin.
///
/// The code is printed to the log at startup when no super admin exists and is valid
/// once. The new super admin is logged in.
///
/// # Returns
/// - `201 Created` - Super admin created and logged in
/// - `400 Bad Request` - Missing fields or weak password
/// - `401 Unauthorized` - Invalid or expired code
/// - `409 Conflict` - A super admin already exists
#[utoipa::path(
    post,
    path = "/api/auth/bootstrap",
    tag = AUTH_TAG,
    request_body = BootstrapDto,
    responses(
        (status = 201, description = "Super admin created", body = UserDto),
        (status = 400, description = "Invalid data", body = ErrorDto),
        (status = 401, description = "Invalid or expired code", body = ErrorDto),
        (status = 409, description = "Super admin already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn bootstrap(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .bootstrap(
            &state.admin_code_service,
            BootstrapParams {
                code: payload.code,
                name: payload.name,
                phone: payload.phone,
                password: payload.password,
            },
        )
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}
