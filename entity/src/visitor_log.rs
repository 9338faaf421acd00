use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visitor_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub building_id: i32,
    pub host_tenant_id: Option<i32>,
    pub visitor_name: String,
    pub visitor_phone: Option<String>,
    pub purpose: String,
    pub vehicle_plate: Option<String>,
    pub check_in: DateTimeUtc,
    pub check_out: Option<DateTimeUtc>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
