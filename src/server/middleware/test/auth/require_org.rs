use super::*;

/// Tests the context carries the user's organization.
///
/// Expected: Ok(OrgContext) with the user's organization id
#[tokio::test]
async fn returns_organization_context() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let org = factory::create_organization(db).await?;
    let manager = factory::create_user(db, org.id).await?;

    AuthSession::new(session).set_user_id(manager.id).await?;

    let ctx = AuthGuard::new(db, session)
        .require_org(&[Permission::ManageProperties])
        .await?;

    assert_eq!(ctx.organization_id, org.id);
    assert_eq!(ctx.user.id, manager.id);

    Ok(())
}

/// Tests a platform super admin cannot call organization-scoped endpoints.
///
/// Expected: Err(AuthError::NoOrganization)
#[tokio::test]
async fn rejects_super_admin_without_organization() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let super_admin = factory::user::UserFactory::new(db, None)
        .role("super_admin")
        .build()
        .await?;

    AuthSession::new(session).set_user_id(super_admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require_org(&[Permission::ManageProperties])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NoOrganization(id))) if id == super_admin.id
    ));

    Ok(())
}
