use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("No user in session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Phone/password pair did not match an account.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The user's account has been deactivated.
    #[error("User {0} is inactive")]
    AccountInactive(i32),

    /// The user's organization has been suspended.
    #[error("Organization {0} is suspended")]
    OrganizationSuspended(i32),

    /// The user lacks a required permission.
    ///
    /// The message is logged but never returned to the client.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// An organization-scoped endpoint was called by a user without an organization.
    #[error("User {0} is not assigned to an organization")]
    NoOrganization(i32),

    /// The bootstrap code is wrong, expired, or already used.
    #[error("Invalid or expired bootstrap code")]
    InvalidBootstrapCode,
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidCredentials` → 401
/// - `AccountInactive` / `OrganizationSuspended` / `AccessDenied` / `NoOrganization` → 403
/// - `InvalidBootstrapCode` → 400
///
/// Details are logged at debug level; clients only receive generic messages.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid phone or password"),
            Self::AccountInactive(_) => (StatusCode::FORBIDDEN, "Account is inactive"),
            Self::OrganizationSuspended(_) => {
                (StatusCode::FORBIDDEN, "Organization is suspended")
            }
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::NoOrganization(_) => (
                StatusCode::FORBIDDEN,
                "User is not assigned to an organization",
            ),
            Self::InvalidBootstrapCode => {
                (StatusCode::BAD_REQUEST, "Invalid or expired bootstrap code")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
