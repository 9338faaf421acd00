use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a complaint from the tenant with the given status.
pub async fn create_complaint(
    db: &DatabaseConnection,
    organization_id: i32,
    tenant_id: i32,
    status: &str,
) -> Result<entity::complaint::Model, DbErr> {
    entity::complaint::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        tenant_id: ActiveValue::Set(tenant_id),
        unit_id: ActiveValue::Set(None),
        category: ActiveValue::Set("plumbing".to_string()),
        title: ActiveValue::Set("Leaking sink".to_string()),
        description: ActiveValue::Set("Kitchen sink leaks under the cabinet".to_string()),
        priority: ActiveValue::Set("medium".to_string()),
        status: ActiveValue::Set(status.to_string()),
        resolution: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        resolved_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
