use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::user::UserRole,
    server::{
        data::{organization::OrganizationRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::user::User,
    },
};

/// Capabilities checked by handlers. Each role grants a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageOrganizations,
    ManageUsers,
    ManageProperties,
    ManageTenants,
    ManageBilling,
    ViewBilling,
    ManageParking,
    ManageVisitors,
    ManageComplaints,
    ManageWorkOrders,
    ViewReports,
}

impl Permission {
    pub fn is_granted_to(self, role: UserRole) -> bool {
        use Permission::*;

        match role {
            UserRole::SuperAdmin => true,
            UserRole::OrgAdmin => self != ManageOrganizations,
            UserRole::PropertyManager => matches!(
                self,
                ManageProperties
                    | ManageTenants
                    | ViewBilling
                    | ManageParking
                    | ManageVisitors
                    | ManageComplaints
                    | ManageWorkOrders
                    | ViewReports
            ),
            UserRole::Accountant => matches!(self, ManageBilling | ViewBilling | ViewReports),
            UserRole::Security => matches!(self, ManageVisitors | ManageParking),
            UserRole::Maintenance => matches!(self, ManageComplaints | ManageWorkOrders),
        }
    }
}

/// An authenticated staff member acting inside their organization.
#[derive(Debug, Clone)]
pub struct OrgContext {
    pub user: User,
    pub organization_id: i32,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the session user and checks every permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Active user holding all permissions
    /// - `Err(AuthError::UserNotInSession | UserNotInDatabase)` - Not logged in
    /// - `Err(AuthError::AccountInactive | OrganizationSuspended)` - Account is blocked
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active() {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        if let Some(organization_id) = user.organization_id {
            let organization = OrganizationRepository::new(self.db)
                .find_by_id(organization_id)
                .await?;

            if !organization.is_some_and(|org| org.is_active()) {
                return Err(AuthError::OrganizationSuspended(organization_id).into());
            }
        }

        if let Some(missing) = permissions.iter().find(|p| !p.is_granted_to(user.role)) {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("role {} lacks permission {:?}", user.role, missing),
            )
            .into());
        }

        Ok(user)
    }

    /// Like `require`, but also requires the user to belong to an organization.
    ///
    /// Platform super admins have no organization and are rejected here.
    pub async fn require_org(&self, permissions: &[Permission]) -> Result<OrgContext, AppError> {
        let user = self.require(permissions).await?;

        let Some(organization_id) = user.organization_id else {
            return Err(AuthError::NoOrganization(user.id).into());
        };

        Ok(OrgContext {
            user,
            organization_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_admin_cannot_manage_organizations() {
        assert!(!Permission::ManageOrganizations.is_granted_to(UserRole::OrgAdmin));
        assert!(Permission::ManageUsers.is_granted_to(UserRole::OrgAdmin));
        assert!(Permission::ManageOrganizations.is_granted_to(UserRole::SuperAdmin));
    }

    #[test]
    fn restricted_roles_only_get_their_area() {
        assert!(Permission::ManageBilling.is_granted_to(UserRole::Accountant));
        assert!(!Permission::ManageTenants.is_granted_to(UserRole::Accountant));

        assert!(Permission::ManageVisitors.is_granted_to(UserRole::Security));
        assert!(!Permission::ViewBilling.is_granted_to(UserRole::Security));

        assert!(Permission::ManageWorkOrders.is_granted_to(UserRole::Maintenance));
        assert!(!Permission::ManageParking.is_granted_to(UserRole::Maintenance));

        assert!(Permission::ViewBilling.is_granted_to(UserRole::PropertyManager));
        assert!(!Permission::ManageBilling.is_granted_to(UserRole::PropertyManager));
        assert!(!Permission::ManageUsers.is_granted_to(UserRole::PropertyManager));
    }
}
