use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a five-floor building in the organization.
pub async fn create_building(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<entity::building::Model, DbErr> {
    let id = next_id();
    entity::building::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        name: ActiveValue::Set(format!("Building {}", id)),
        address: ActiveValue::Set(format!("{} Bole Road", id)),
        floors: ActiveValue::Set(5),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
