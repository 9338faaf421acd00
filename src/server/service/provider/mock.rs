use async_trait::async_trait;

use crate::{model::billing::PaymentProviderKind, server::error::payment::PaymentError};

use super::{InitiatePayment, InitiatedPayment, PaymentProvider, VerificationOutcome};

/// Stand-in provider with a fixed verification outcome.
pub struct MockProvider {
    kind: PaymentProviderKind,
    app_url: String,
    outcome: VerificationOutcome,
}

impl MockProvider {
    pub fn new(kind: PaymentProviderKind, app_url: &str) -> Self {
        Self {
            kind,
            app_url: app_url.trim_end_matches('/').to_string(),
            outcome: VerificationOutcome::Succeeded,
        }
    }

    pub fn with_outcome(mut self, outcome: VerificationOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    fn kind(&self) -> PaymentProviderKind {
        self.kind
    }

    async fn initiate(&self, request: &InitiatePayment) -> Result<InitiatedPayment, PaymentError> {
        tracing::debug!(
            "Mock {} payment {} for {} {}",
            self.kind,
            request.reference,
            request.amount,
            request.currency
        );

        Ok(InitiatedPayment {
            checkout_url: Some(format!(
                "{}/mock-checkout/{}/{}",
                self.app_url, self.kind, request.reference
            )),
        })
    }

    async fn verify(&self, _reference: &str) -> Result<VerificationOutcome, PaymentError> {
        Ok(self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InitiatePayment {
        InitiatePayment {
            reference: "ref-1".to_string(),
            amount: 10_000,
            currency: "ETB".to_string(),
            invoice_number: "INV-202601-0001".to_string(),
            customer_name: "Abebe".to_string(),
            customer_phone: "0911000000".to_string(),
            customer_email: None,
        }
    }

    #[tokio::test]
    async fn builds_checkout_url_from_reference() {
        let provider = MockProvider::new(PaymentProviderKind::Telebirr, "http://localhost:8080/");

        let initiated = provider.initiate(&request()).await.unwrap();

        assert_eq!(
            initiated.checkout_url.as_deref(),
            Some("http://localhost:8080/mock-checkout/telebirr/ref-1")
        );
    }

    #[tokio::test]
    async fn reports_configured_outcome() {
        let provider = MockProvider::new(PaymentProviderKind::CbeBirr, "http://localhost")
            .with_outcome(VerificationOutcome::Failed);

        assert_eq!(
            provider.verify("ref-1").await.unwrap(),
            VerificationOutcome::Failed
        );
    }
}
