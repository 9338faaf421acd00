use super::*;
use crate::{
    model::user::UserRole,
    server::{
        error::auth::AuthError,
        service::{
            admin::code::AdminCodeService,
            auth::{AuthService, BootstrapParams, LoginParams},
        },
        util::password::hash_password,
    },
};

const PASSWORD: &str = "lobby-keys-42";

fn login(organization: Option<&str>, phone: &str, password: &str) -> LoginParams {
    LoginParams {
        organization: organization.map(str::to_string),
        phone: phone.to_string(),
        password: password.to_string(),
    }
}

/// Tests staff log in with organization slug, phone and password.
///
/// Expected: Ok(user) for matching credentials, InvalidCredentials for a wrong password
#[tokio::test]
async fn login_checks_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::organization::OrganizationFactory::new(db)
        .slug("bole-towers")
        .build()
        .await?;
    let user = factory::user::UserFactory::new(db, Some(org.id))
        .phone("0911555666")
        .password_hash(hash_password(PASSWORD)?)
        .build()
        .await?;
    let service = AuthService::new(db);

    let logged_in = service
        .login(login(Some("bole-towers"), "0911 555 666", PASSWORD))
        .await?;
    assert_eq!(logged_in.id, user.id);

    let wrong = service
        .login(login(Some("bole-towers"), "0911555666", "not-the-password"))
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests an unknown organization slug looks the same as bad credentials.
///
/// Expected: Err(AuthError::InvalidCredentials)
#[tokio::test]
async fn login_rejects_unknown_organization() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = AuthService::new(db)
        .login(login(Some("nowhere"), "0911555666", PASSWORD))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests valid credentials in a suspended organization are refused.
///
/// Expected: Err(AuthError::OrganizationSuspended)
#[tokio::test]
async fn login_rejects_suspended_organization() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::organization::OrganizationFactory::new(db)
        .slug("closed-plaza")
        .status("suspended")
        .build()
        .await?;
    factory::user::UserFactory::new(db, Some(org.id))
        .phone("0911777888")
        .password_hash(hash_password(PASSWORD)?)
        .build()
        .await?;

    let result = AuthService::new(db)
        .login(login(Some("closed-plaza"), "0911777888", PASSWORD))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::OrganizationSuspended(id))) if id == org.id
    ));

    Ok(())
}

/// Tests deactivated accounts can't log in.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn login_rejects_inactive_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::organization::OrganizationFactory::new(db)
        .slug("quiet-court")
        .build()
        .await?;
    let user = factory::user::UserFactory::new(db, Some(org.id))
        .phone("0911999000")
        .password_hash(hash_password(PASSWORD)?)
        .status("inactive")
        .build()
        .await?;

    let result = AuthService::new(db)
        .login(login(Some("quiet-court"), "0911999000", PASSWORD))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(id))) if id == user.id
    ));

    Ok(())
}

/// Tests the bootstrap code creates exactly one super admin.
///
/// Expected: super admin without organization; a second bootstrap conflicts
#[tokio::test]
async fn bootstrap_creates_single_super_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let codes = AdminCodeService::new();
    let service = AuthService::new(db);
    let params = |code: String| BootstrapParams {
        code,
        name: "Platform Owner".to_string(),
        phone: "0911000001".to_string(),
        password: PASSWORD.to_string(),
    };

    let code = codes.generate().await;
    let admin = service.bootstrap(&codes, params(code)).await?;

    assert_eq!(admin.role, UserRole::SuperAdmin);
    assert_eq!(admin.organization_id, None);

    let logged_in = service.login(login(None, "0911000001", PASSWORD)).await?;
    assert_eq!(logged_in.id, admin.id);

    let code = codes.generate().await;
    let again = service.bootstrap(&codes, params(code)).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests a wrong code is rejected before anything is created.
///
/// Expected: Err(AuthError::InvalidBootstrapCode)
#[tokio::test]
async fn bootstrap_rejects_wrong_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let codes = AdminCodeService::new();
    codes.generate().await;

    let result = AuthService::new(db)
        .bootstrap(
            &codes,
            BootstrapParams {
                code: "wrong".to_string(),
                name: "Platform Owner".to_string(),
                phone: "0911000001".to_string(),
                password: PASSWORD.to_string(),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidBootstrapCode))
    ));

    Ok(())
}
