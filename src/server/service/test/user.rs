use super::*;
use crate::{
    model::user::{UserRole, UserStatus},
    server::{
        model::user::{CreateUserParams, UpdateUserParams},
        service::user::UserService,
        util::password::verify_password,
    },
};

/// Tests new staff get a normalized phone and a hashed password.
///
/// Expected: phone without spaces, hash verifying the original password
#[tokio::test]
async fn create_hashes_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;

    let user = UserService::new(db)
        .create(CreateUserParams {
            organization_id: Some(org.id),
            name: "Selam Tesfaye".to_string(),
            phone: "0911 22 33 44".to_string(),
            email: None,
            password: "rent-ledger-8".to_string(),
            role: UserRole::Accountant,
        })
        .await?;

    assert_eq!(user.phone, "0911223344");
    assert_ne!(user.password_hash, "rent-ledger-8");
    assert!(verify_password("rent-ledger-8", &user.password_hash));

    Ok(())
}

/// Tests phones are unique within an organization.
///
/// Expected: Err(AppError::Conflict) for the same phone written differently
#[tokio::test]
async fn create_rejects_duplicate_phone() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    factory::user::UserFactory::new(db, Some(org.id))
        .phone("0911223344")
        .build()
        .await?;

    let result = UserService::new(db)
        .create(CreateUserParams {
            organization_id: Some(org.id),
            name: "Dawit Alemu".to_string(),
            phone: "0911-223-344".to_string(),
            email: None,
            password: "rent-ledger-8".to_string(),
            role: UserRole::Security,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests short passwords are rejected.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn create_rejects_short_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;

    let result = UserService::new(db)
        .create(CreateUserParams {
            organization_id: Some(org.id),
            name: "Dawit Alemu".to_string(),
            phone: "0911000111".to_string(),
            email: None,
            password: "short".to_string(),
            role: UserRole::Security,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests the last active org admin can't be demoted.
///
/// Expected: Err(AppError::Conflict); succeeds once a second admin exists
#[tokio::test]
async fn update_keeps_last_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let admin = factory::user::create_org_admin(db, org.id).await?;
    let service = UserService::new(db);
    let demote = || UpdateUserParams {
        id: admin.id,
        organization_id: org.id,
        name: admin.name.clone(),
        email: None,
        role: UserRole::PropertyManager,
        status: UserStatus::Active,
    };

    let result = service.update(demote()).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    factory::user::create_org_admin(db, org.id).await?;

    let demoted = service.update(demote()).await?;
    assert_eq!(demoted.role, UserRole::PropertyManager);

    Ok(())
}

/// Tests users can't delete themselves or the last admin.
///
/// Expected: BadRequest for self deletion, Conflict for the last admin, other users deleted
#[tokio::test]
async fn delete_guards_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let admin = factory::user::create_org_admin(db, org.id).await?;
    let manager = factory::create_user(db, org.id).await?;
    let service = UserService::new(db);

    let own = service.delete(admin.id, org.id, admin.id).await;
    assert!(matches!(own, Err(AppError::BadRequest(_))));

    let last = service.delete(manager.id, org.id, admin.id).await;
    assert!(matches!(last, Err(AppError::Conflict(_))));

    service.delete(admin.id, org.id, manager.id).await?;
    let gone = service.get(org.id, manager.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    Ok(())
}
