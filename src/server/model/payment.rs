use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::billing::{PaymentDto, PaymentMethod, PaymentStatus, RecordPaymentDto},
    server::util::{normalize::optional_text, parse::parse_enum},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub organization_id: i32,
    pub invoice_id: i32,
    pub tenant_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
    pub recorded_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            organization_id: entity.organization_id,
            invoice_id: entity.invoice_id,
            tenant_id: entity.tenant_id,
            amount: entity.amount,
            method: parse_enum("payment.method", &entity.method)?,
            reference: entity.reference,
            status: parse_enum("payment.status", &entity.status)?,
            paid_at: entity.paid_at,
            recorded_by: entity.recorded_by,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            invoice_id: self.invoice_id,
            tenant_id: self.tenant_id,
            amount: self.amount,
            method: self.method,
            reference: self.reference,
            status: self.status,
            paid_at: self.paid_at,
            recorded_by: self.recorded_by,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordPaymentParams {
    pub organization_id: i32,
    pub invoice_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_at: DateTime<Utc>,
    /// Staff member who recorded the payment; `None` for provider confirmations.
    pub recorded_by: Option<i32>,
}

impl RecordPaymentParams {
    pub fn from_dto(organization_id: i32, recorded_by: i32, dto: RecordPaymentDto) -> Self {
        Self {
            organization_id,
            invoice_id: dto.invoice_id,
            amount: dto.amount,
            method: dto.method,
            reference: optional_text(dto.reference),
            paid_at: dto.paid_at.unwrap_or_else(Utc::now),
            recorded_by: Some(recorded_by),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub invoice_id: Option<i32>,
    pub tenant_id: Option<i32>,
    pub method: Option<PaymentMethod>,
}
