//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let admin = UserFactory::new(&db, Some(org.id))
///     .role("org_admin")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    organization_id: Option<i32>,
    name: String,
    phone: String,
    password_hash: String,
    role: String,
    status: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - name: `"User {id}"`
    /// - phone: `"09{id:08}"`
    /// - role: `"property_manager"`
    /// - status: `"active"`
    /// - password_hash: a placeholder that never verifies
    pub fn new(db: &'a DatabaseConnection, organization_id: Option<i32>) -> Self {
        let id = next_id();
        Self {
            db,
            organization_id,
            name: format!("User {}", id),
            phone: format!("09{:08}", id),
            password_hash: "unverifiable".to_string(),
            role: "property_manager".to_string(),
            status: "active".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            organization_id: ActiveValue::Set(self.organization_id),
            name: ActiveValue::Set(self.name),
            phone: ActiveValue::Set(self.phone),
            email: ActiveValue::Set(None),
            password_hash: ActiveValue::Set(self.password_hash),
            role: ActiveValue::Set(self.role),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active property manager in the organization.
pub async fn create_user(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db, Some(organization_id)).build().await
}

/// Creates an active org admin in the organization.
pub async fn create_org_admin(
    db: &DatabaseConnection,
    organization_id: i32,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db, Some(organization_id))
        .role("org_admin")
        .build()
        .await
}
