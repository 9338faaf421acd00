//! Chapa hosted checkout over its REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{model::billing::PaymentProviderKind, server::error::payment::PaymentError};

use super::{InitiatePayment, InitiatedPayment, PaymentProvider, VerificationOutcome};

pub struct ChapaProvider {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
    app_url: String,
}

#[derive(Debug, Serialize)]
struct InitializeRequest<'a> {
    amount: String,
    currency: &'a str,
    tx_ref: &'a str,
    first_name: &'a str,
    phone_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    return_url: String,
    customization: Customization<'a>,
}

#[derive(Debug, Serialize)]
struct Customization<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChapaResponse<T> {
    status: String,
    message: Option<serde_json::Value>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CheckoutData {
    checkout_url: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    status: String,
}

impl ChapaProvider {
    pub fn new(http: reqwest::Client, base_url: String, secret_key: String, app_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    fn request_failed(reason: impl ToString) -> PaymentError {
        PaymentError::ProviderRequest {
            provider: PaymentProviderKind::Chapa,
            reason: reason.to_string(),
        }
    }

    async fn read<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let status = response.status();
        let body: ChapaResponse<T> = response.json().await.map_err(Self::request_failed)?;

        if !status.is_success() || body.status != "success" {
            return Err(Self::request_failed(format!(
                "http {}: {}",
                status,
                body.message.map(|m| m.to_string()).unwrap_or_default()
            )));
        }

        body.data
            .ok_or_else(|| Self::request_failed("response has no data"))
    }
}

#[async_trait]
impl PaymentProvider for ChapaProvider {
    fn kind(&self) -> PaymentProviderKind {
        PaymentProviderKind::Chapa
    }

    async fn initiate(&self, request: &InitiatePayment) -> Result<InitiatedPayment, PaymentError> {
        let body = InitializeRequest {
            amount: major_units(request.amount),
            currency: &request.currency,
            tx_ref: &request.reference,
            first_name: &request.customer_name,
            phone_number: &request.customer_phone,
            email: request.customer_email.as_deref(),
            return_url: format!("{}/payments/return/{}", self.app_url, request.reference),
            customization: Customization {
                title: &request.invoice_number,
            },
        };

        let response = self
            .http
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let data: CheckoutData = Self::read(response).await?;

        Ok(InitiatedPayment {
            checkout_url: Some(data.checkout_url),
        })
    }

    async fn verify(&self, reference: &str) -> Result<VerificationOutcome, PaymentError> {
        let response = self
            .http
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let data: VerifyData = Self::read(response).await?;

        Ok(match data.status.as_str() {
            "success" => VerificationOutcome::Succeeded,
            "pending" => VerificationOutcome::Pending,
            _ => VerificationOutcome::Failed,
        })
    }
}

/// Formats minor units as a decimal amount with two places, e.g. `12345` → `"123.45"`.
fn major_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let amount = amount.unsigned_abs();

    format!("{}{}.{:02}", sign, amount / 100, amount % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minor_units() {
        assert_eq!(major_units(12_345), "123.45");
        assert_eq!(major_units(5), "0.05");
        assert_eq!(major_units(100_000), "1000.00");
    }
}
