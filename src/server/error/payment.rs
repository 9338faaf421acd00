use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::{api::ErrorDto, billing::PaymentProviderKind};

#[derive(Error, Debug)]
pub enum PaymentError {
    /// No provider implementation is registered for the requested kind.
    #[error("Payment provider {0} is not available")]
    ProviderUnavailable(PaymentProviderKind),

    /// The provider could not be reached or returned an unexpected response.
    #[error("Payment provider {provider} request failed: {reason}")]
    ProviderRequest {
        provider: PaymentProviderKind,
        reason: String,
    },
}

/// - `ProviderUnavailable` → 400 Bad Request
/// - `ProviderRequest` → 502 Bad Gateway
impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        match self {
            Self::ProviderUnavailable(kind) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: format!("Payment provider {} is not available", kind),
                }),
            )
                .into_response(),
            err @ Self::ProviderRequest { .. } => {
                tracing::error!("{}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: "Payment provider request failed".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
