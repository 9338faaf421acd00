//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories only fill required
//! columns; organization scoping is always explicit so tests can build cross-organization
//! scenarios.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let org = factory::organization::create_organization(&db).await?;
//! let admin = factory::user::UserFactory::new(&db, Some(org.id))
//!     .role("org_admin")
//!     .phone("0911000000")
//!     .build()
//!     .await?;
//! let (building, unit) = factory::helpers::create_building_with_unit(&db, org.id).await?;
//! ```

pub mod building;
pub mod complaint;
pub mod helpers;
pub mod invoice;
pub mod lease;
pub mod organization;
pub mod parking;
pub mod tenant;
pub mod unit;
pub mod user;
pub mod visitor_log;
pub mod work_order;

pub use building::create_building;
pub use organization::create_organization;
pub use tenant::create_tenant;
pub use unit::create_unit;
pub use user::create_user;
