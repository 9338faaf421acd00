//! Online payment providers.
//!
//! Each provider implements [`PaymentProvider`]. Telebirr, CBE Birr and HelloCash are
//! mocked; Chapa talks to the real API when a secret key is configured.

pub mod chapa;
pub mod mock;

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    model::billing::PaymentProviderKind,
    server::{config::Config, error::payment::PaymentError},
};

use self::{chapa::ChapaProvider, mock::MockProvider};

const PROVIDER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What a provider needs to start collecting a payment.
#[derive(Debug, Clone)]
pub struct InitiatePayment {
    /// Our unique transaction reference.
    pub reference: String,
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitiatedPayment {
    /// Where the payer completes the payment, when the provider uses a hosted page.
    pub checkout_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Succeeded,
    Failed,
    /// The payer has not finished yet.
    Pending,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    fn kind(&self) -> PaymentProviderKind;

    async fn initiate(&self, request: &InitiatePayment) -> Result<InitiatedPayment, PaymentError>;

    async fn verify(&self, reference: &str) -> Result<VerificationOutcome, PaymentError>;
}

/// Registry of available providers keyed by kind. Cheap to clone.
#[derive(Clone, Default)]
pub struct PaymentProviders {
    providers: HashMap<PaymentProviderKind, Arc<dyn PaymentProvider>>,
}

impl PaymentProviders {
    /// Registers every provider, using the real Chapa API when a secret key is set.
    pub fn from_config(config: &Config) -> Result<Self, PaymentError> {
        let mut providers = Self::mocked(&config.app_url);

        if let Some(secret_key) = &config.chapa_secret_key {
            let http = reqwest::Client::builder()
                .timeout(PROVIDER_REQUEST_TIMEOUT)
                .build()
                .map_err(|e| PaymentError::ProviderRequest {
                    provider: PaymentProviderKind::Chapa,
                    reason: e.to_string(),
                })?;

            providers = providers.with(ChapaProvider::new(
                http,
                config.chapa_base_url.clone(),
                secret_key.clone(),
                config.app_url.clone(),
            ));
            tracing::info!("Chapa payments use {}", config.chapa_base_url);
        } else {
            tracing::info!("CHAPA_SECRET_KEY not set; Chapa payments are mocked");
        }

        Ok(providers)
    }

    /// Every provider kind backed by a mock that always succeeds.
    pub fn mocked(app_url: &str) -> Self {
        [
            PaymentProviderKind::Telebirr,
            PaymentProviderKind::CbeBirr,
            PaymentProviderKind::Chapa,
            PaymentProviderKind::HelloCash,
        ]
        .into_iter()
        .fold(Self::default(), |providers, kind| {
            providers.with(MockProvider::new(kind, app_url))
        })
    }

    /// Registers a provider, replacing any provider of the same kind.
    pub fn with(mut self, provider: impl PaymentProvider + 'static) -> Self {
        self.providers.insert(provider.kind(), Arc::new(provider));
        self
    }

    pub fn get(&self, kind: PaymentProviderKind) -> Result<Arc<dyn PaymentProvider>, PaymentError> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(PaymentError::ProviderUnavailable(kind))
    }
}
