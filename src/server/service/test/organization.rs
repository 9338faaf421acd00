use super::*;
use crate::{
    model::{organization::OrganizationStatus, user::UserRole},
    server::{
        model::organization::CreateOrganizationParams,
        service::organization::OrganizationService,
    },
};

fn new_organization(slug: &str) -> CreateOrganizationParams {
    CreateOrganizationParams {
        name: "Sunrise Towers".to_string(),
        slug: slug.to_string(),
        contact_email: None,
        contact_phone: None,
        admin_name: "Hanna Bekele".to_string(),
        admin_phone: "0911 00 11 22".to_string(),
        admin_password: "rent-ledger-8".to_string(),
    }
}

/// Tests an organization is created with a lowercased slug and its first admin.
///
/// Expected: active organization `sunrise-towers` with an org admin
#[tokio::test]
async fn create_adds_first_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (organization, admin) = OrganizationService::new(db)
        .create(new_organization("Sunrise-Towers"))
        .await?;

    assert_eq!(organization.slug, "sunrise-towers");
    assert_eq!(organization.status, OrganizationStatus::Active);
    assert_eq!(admin.organization_id, Some(organization.id));
    assert_eq!(admin.role, UserRole::OrgAdmin);
    assert_eq!(admin.phone, "0911001122");

    Ok(())
}

/// Tests slugs only allow lowercase letters, digits and dashes.
///
/// Expected: Err(AppError::BadRequest) for spaces, punctuation and empty slugs
#[tokio::test]
async fn create_rejects_invalid_slug() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = OrganizationService::new(db);

    for slug in ["sunrise towers", "sunrise_towers!", ""] {
        let result = service.create(new_organization(slug)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))), "{slug}");
    }

    Ok(())
}

/// Tests slugs are unique across organizations.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn create_rejects_taken_slug() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::organization::OrganizationFactory::new(db)
        .slug("sunrise")
        .build()
        .await?;

    let result = OrganizationService::new(db)
        .create(new_organization("Sunrise"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
