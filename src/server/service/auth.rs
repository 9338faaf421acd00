//! Phone/password login and first super admin bootstrap.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserRole,
    server::{
        data::{organization::OrganizationRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::user::{CreateUserParams, User},
        service::admin::code::AdminCodeService,
        util::{
            normalize::{non_empty, normalize_phone},
            password::{hash_password, validate_password, verify_password},
        },
    },
};

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone)]
pub struct LoginParams {
    /// Organization slug; `None` logs in as a platform super admin.
    pub organization: Option<String>,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct BootstrapParams {
    pub code: String,
    pub name: String,
    pub phone: String,
    pub password: String,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks credentials and account state.
    ///
    /// Unknown organizations, unknown phones and wrong passwords all yield
    /// `InvalidCredentials` so callers cannot tell which part was wrong.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials valid, account and organization active
    /// - `Err(AuthError::InvalidCredentials)` - No match
    /// - `Err(AuthError::AccountInactive | OrganizationSuspended)` - Blocked account
    pub async fn login(&self, params: LoginParams) -> Result<User, AppError> {
        let phone = normalize_phone(&params.phone);

        let organization = match params.organization.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => {
                let Some(organization) = OrganizationRepository::new(self.db)
                    .find_by_slug(slug)
                    .await?
                else {
                    return Err(AuthError::InvalidCredentials.into());
                };
                Some(organization)
            }
            _ => None,
        };

        let Some(user) = UserRepository::new(self.db)
            .find_by_phone(organization.as_ref().map(|org| org.id), &phone)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&params.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active() {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        if let Some(organization) = organization {
            if !organization.is_active() {
                return Err(AuthError::OrganizationSuspended(organization.id).into());
            }
        }

        tracing::info!("User {} logged in", user.id);

        Ok(user)
    }

    /// Creates the first super admin by redeeming the startup code.
    ///
    /// Input is validated before the code is consumed so a typo doesn't burn the code.
    pub async fn bootstrap(
        &self,
        admin_codes: &AdminCodeService,
        params: BootstrapParams,
    ) -> Result<User, AppError> {
        let name = non_empty(&params.name)
            .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;
        let phone = normalize_phone(&params.phone);
        if phone.is_empty() {
            return Err(AppError::BadRequest("Phone is required".to_string()));
        }
        validate_password(&params.password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.super_admin_exists().await? {
            return Err(AppError::Conflict(
                "A super admin already exists".to_string(),
            ));
        }

        if !admin_codes.validate_and_consume(params.code.trim()).await {
            return Err(AuthError::InvalidBootstrapCode.into());
        }

        let password_hash = hash_password(&params.password)?;
        let user = user_repo
            .create(
                &CreateUserParams {
                    organization_id: None,
                    name,
                    phone,
                    email: None,
                    password: params.password,
                    role: UserRole::SuperAdmin,
                },
                password_hash,
            )
            .await?;

        tracing::info!("Created super admin {} from bootstrap code", user.id);

        Ok(user)
    }
}
