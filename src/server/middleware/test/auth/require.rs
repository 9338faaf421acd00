use super::*;

/// Tests an org admin passes a check for an organization-level permission.
///
/// Expected: Ok(User) with the org admin's id
#[tokio::test]
async fn grants_access_to_org_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let org = factory::create_organization(db).await?;
    let admin = factory::user::create_org_admin(db, org.id).await?;

    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ManageUsers, Permission::ManageBilling])
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, admin.id);

    Ok(())
}

/// Tests a role without the permission is denied.
///
/// Expected: Err(AuthError::AccessDenied) naming the missing permission
#[tokio::test]
async fn denies_access_when_role_lacks_permission() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let org = factory::create_organization(db).await?;
    let guard = factory::user::UserFactory::new(db, Some(org.id))
        .role("security")
        .build()
        .await?;

    AuthSession::new(session).set_user_id(guard.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ManageBilling])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, guard.id);
            assert!(message.contains("ManageBilling"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other),
    }

    Ok(())
}

/// Tests an empty session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn denies_access_when_not_authenticated() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a deleted user is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn denies_access_when_user_missing() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(999).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(999)))
    ));

    Ok(())
}

/// Tests an inactive account is rejected even with the right role.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn denies_access_to_inactive_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let org = factory::create_organization(db).await?;
    let user = factory::user::UserFactory::new(db, Some(org.id))
        .role("org_admin")
        .status("inactive")
        .build()
        .await?;

    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(id))) if id == user.id
    ));

    Ok(())
}

/// Tests members of a suspended organization are locked out.
///
/// Expected: Err(AuthError::OrganizationSuspended)
#[tokio::test]
async fn denies_access_when_organization_suspended() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let org = factory::organization::OrganizationFactory::new(db)
        .status("suspended")
        .build()
        .await?;
    let admin = factory::user::create_org_admin(db, org.id).await?;

    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::OrganizationSuspended(id))) if id == org.id
    ));

    Ok(())
}
