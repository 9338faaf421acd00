use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::billing::{
        CreatePaymentIntentDto, PaymentIntentDto, PaymentIntentStatus, PaymentProviderKind,
    },
    server::util::parse::parse_enum,
};

/// A request to collect an invoice amount through an online provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: i32,
    pub organization_id: i32,
    pub invoice_id: i32,
    pub provider: PaymentProviderKind,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentIntentStatus,
    /// Our transaction reference, sent to the provider and globally unique.
    pub provider_reference: String,
    pub checkout_url: Option<String>,
    /// Payment recorded when the intent completed.
    pub payment_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl PaymentIntent {
    pub fn from_entity(entity: entity::payment_intent::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            invoice_id: entity.invoice_id,
            provider: parse_enum("payment_intent.provider", &entity.provider)?,
            amount: entity.amount,
            currency: entity.currency,
            status: parse_enum("payment_intent.status", &entity.status)?,
            provider_reference: entity.provider_reference,
            checkout_url: entity.checkout_url,
            payment_id: entity.payment_id,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        })
    }

    pub fn into_dto(self) -> PaymentIntentDto {
        PaymentIntentDto {
            id: self.id,
            invoice_id: self.invoice_id,
            provider: self.provider,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            provider_reference: self.provider_reference,
            checkout_url: self.checkout_url,
            payment_id: self.payment_id,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePaymentIntentParams {
    pub organization_id: i32,
    pub invoice_id: i32,
    pub provider: PaymentProviderKind,
    pub amount: i64,
    pub currency: String,
    pub provider_reference: String,
    pub checkout_url: Option<String>,
}

/// An intent as requested by a client.
#[derive(Debug, Clone)]
pub struct NewPaymentIntent {
    pub organization_id: i32,
    pub invoice_id: i32,
    pub provider: PaymentProviderKind,
    /// `None` collects the full invoice balance.
    pub amount: Option<i64>,
}

impl NewPaymentIntent {
    pub fn from_dto(organization_id: i32, dto: CreatePaymentIntentDto) -> Self {
        Self {
            organization_id,
            invoice_id: dto.invoice_id,
            provider: dto.provider,
            amount: dto.amount,
        }
    }
}
