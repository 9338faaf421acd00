use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a visit. A `check_out` of `Some` creates a completed visit.
pub async fn create_visit(
    db: &DatabaseConnection,
    organization_id: i32,
    building_id: i32,
    visitor_name: &str,
    purpose: &str,
    check_in: DateTime<Utc>,
    check_out: Option<DateTime<Utc>>,
) -> Result<entity::visitor_log::Model, DbErr> {
    entity::visitor_log::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        building_id: ActiveValue::Set(building_id),
        host_tenant_id: ActiveValue::Set(None),
        visitor_name: ActiveValue::Set(visitor_name.to_string()),
        visitor_phone: ActiveValue::Set(None),
        purpose: ActiveValue::Set(purpose.to_string()),
        vehicle_plate: ActiveValue::Set(None),
        check_in: ActiveValue::Set(check_in),
        check_out: ActiveValue::Set(check_out),
        status: ActiveValue::Set(
            if check_out.is_some() {
                "checked_out"
            } else {
                "checked_in"
            }
            .to_string(),
        ),
        ..Default::default()
    }
    .insert(db)
    .await
}
