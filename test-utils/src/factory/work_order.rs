use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a work order in the building with the given status and optional complaint link.
pub async fn create_work_order(
    db: &DatabaseConnection,
    organization_id: i32,
    building_id: i32,
    complaint_id: Option<i32>,
    status: &str,
) -> Result<entity::work_order::Model, DbErr> {
    entity::work_order::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        building_id: ActiveValue::Set(building_id),
        unit_id: ActiveValue::Set(None),
        complaint_id: ActiveValue::Set(complaint_id),
        title: ActiveValue::Set("Replace pipe".to_string()),
        description: ActiveValue::Set("Replace the corroded pipe".to_string()),
        priority: ActiveValue::Set("medium".to_string()),
        status: ActiveValue::Set(status.to_string()),
        assigned_to: ActiveValue::Set(None),
        estimated_cost: ActiveValue::Set(None),
        actual_cost: ActiveValue::Set(None),
        due_date: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        completed_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
