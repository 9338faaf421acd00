//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request handler
//! through Axum's state extraction. It holds:
//! - Database connection pool for data persistence
//! - Payment provider registry for online payment intents
//! - Bootstrap code service for creating the first super admin
//! - Billing defaults (currency, invoice due days)

use sea_orm::DatabaseConnection;

use super::service::{admin::code::AdminCodeService, provider::PaymentProviders};

/// Billing defaults applied when a request omits them.
#[derive(Clone, Debug)]
pub struct BillingSettings {
    /// ISO currency code stamped on payment intents.
    pub currency: String,
    /// Days between issue and due date for generated invoices.
    pub invoice_due_days: i64,
}

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a pool handle, the provider
/// registry and admin code service share state through `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Registered payment providers keyed by provider kind.
    pub providers: PaymentProviders,

    /// Service for managing the one-time bootstrap code.
    pub admin_code_service: AdminCodeService,

    pub billing: BillingSettings,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    pub fn new(
        db: DatabaseConnection,
        providers: PaymentProviders,
        admin_code_service: AdminCodeService,
        billing: BillingSettings,
    ) -> Self {
        Self {
            db,
            providers,
            admin_code_service,
            billing,
        }
    }
}
