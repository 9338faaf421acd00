use super::*;
use crate::server::data::user::UserRepository;

/// Tests phone lookups never cross organizations.
///
/// Expected: the same phone resolves to a different user per organization, and a lookup
/// without organization only matches super admins
#[tokio::test]
async fn find_by_phone_is_scoped_to_organization() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org_a = factory::create_organization(db).await?;
    let org_b = factory::create_organization(db).await?;
    let user_a = factory::user::UserFactory::new(db, Some(org_a.id))
        .phone("0911223344")
        .build()
        .await?;
    let user_b = factory::user::UserFactory::new(db, Some(org_b.id))
        .phone("0911223344")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found_a = repo.find_by_phone(Some(org_a.id), "0911223344").await?;
    let found_b = repo.find_by_phone(Some(org_b.id), "0911223344").await?;
    let platform = repo.find_by_phone(None, "0911223344").await?;

    assert_eq!(found_a.map(|u| u.id), Some(user_a.id));
    assert_eq!(found_b.map(|u| u.id), Some(user_b.id));
    assert!(platform.is_none());

    Ok(())
}

/// Tests the duplicate phone check ignores the user being updated.
///
/// Expected: true for another user, false once that user is excluded
#[tokio::test]
async fn phone_exists_honours_exclusion() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let user = factory::user::UserFactory::new(db, Some(org.id))
        .phone("0922000000")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.phone_exists(Some(org.id), "0922000000", None).await?);
    assert!(!repo
        .phone_exists(Some(org.id), "0922000000", Some(user.id))
        .await?);
    assert!(!repo.phone_exists(Some(org.id), "0933000000", None).await?);

    Ok(())
}

/// Tests only active org admins of the organization are counted.
///
/// Expected: 1 (inactive admins, other roles and other organizations are excluded)
#[tokio::test]
async fn counts_active_org_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let other = factory::create_organization(db).await?;

    factory::user::create_org_admin(db, org.id).await?;
    factory::user::UserFactory::new(db, Some(org.id))
        .role("org_admin")
        .status("inactive")
        .build()
        .await?;
    factory::create_user(db, org.id).await?;
    factory::user::create_org_admin(db, other.id).await?;

    let count = UserRepository::new(db)
        .count_active_org_admins(org.id)
        .await?;

    assert_eq!(count, 1);

    Ok(())
}

/// Tests super admin detection.
///
/// Expected: false on an empty table, true after a super admin is inserted
#[tokio::test]
async fn detects_super_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    assert!(!repo.super_admin_exists().await?);

    factory::user::UserFactory::new(db, None)
        .role("super_admin")
        .build()
        .await?;

    assert!(repo.super_admin_exists().await?);

    Ok(())
}
