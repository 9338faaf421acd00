use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "work_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub building_id: i32,
    pub unit_id: Option<i32>,
    pub complaint_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<i32>,
    pub estimated_cost: Option<i64>,
    pub actual_cost: Option<i64>,
    pub due_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
