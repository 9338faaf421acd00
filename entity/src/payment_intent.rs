use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_intent")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub invoice_id: i32,
    pub provider: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[sea_orm(unique)]
    pub provider_reference: String,
    pub checkout_url: Option<String>,
    pub payment_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
