use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{
        auth::{self, AUTH_TAG},
        building::{self, BUILDING_TAG},
        complaint::{self, COMPLAINT_TAG},
        invoice::{self, INVOICE_TAG},
        lease::{self, LEASE_TAG},
        organization::{self, ORGANIZATION_TAG},
        parking::{assignment, pricing, space, violation, PARKING_TAG},
        payment::{self, PAYMENT_TAG},
        payment_intent::{self, PAYMENT_INTENT_TAG},
        report::{self, REPORT_TAG},
        tenant::{self, TENANT_TAG},
        unit::{self, UNIT_TAG},
        user::{self, USER_TAG},
        visitor::{self, VISITOR_TAG},
        work_order::{self, WORK_ORDER_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "BuildingOps API", description = "Multi-tenant building management backend"),
    tags(
        (name = AUTH_TAG, description = "Session login and super admin bootstrap"),
        (name = ORGANIZATION_TAG, description = "Organization management for super admins"),
        (name = USER_TAG, description = "Staff accounts within an organization"),
        (name = BUILDING_TAG, description = "Buildings"),
        (name = UNIT_TAG, description = "Rentable units"),
        (name = TENANT_TAG, description = "Tenants"),
        (name = LEASE_TAG, description = "Leases binding tenants to units"),
        (name = INVOICE_TAG, description = "Invoices and monthly invoice generation"),
        (name = PAYMENT_TAG, description = "Recorded payments"),
        (name = PAYMENT_INTENT_TAG, description = "Online payments through external providers"),
        (name = PARKING_TAG, description = "Parking spaces, pricing, assignments and violations"),
        (name = VISITOR_TAG, description = "Visitor check-in and analytics"),
        (name = COMPLAINT_TAG, description = "Tenant complaints"),
        (name = WORK_ORDER_TAG, description = "Maintenance work orders"),
        (name = REPORT_TAG, description = "Dashboard and revenue reports"),
    )
)]
struct ApiDoc;

/// Builds the API router and serves the generated OpenAPI document at `/api/openapi.json`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(auth::bootstrap))
        .routes(routes!(
            organization::create_organization,
            organization::get_organizations
        ))
        .routes(routes!(
            organization::get_organization,
            organization::update_organization
        ))
        .routes(routes!(organization::set_organization_status))
        .routes(routes!(user::create_user, user::get_users))
        .routes(routes!(
            user::get_user_by_id,
            user::update_user,
            user::delete_user
        ))
        .routes(routes!(user::change_password))
        .routes(routes!(building::create_building, building::get_buildings))
        .routes(routes!(
            building::get_building,
            building::update_building,
            building::delete_building
        ))
        .routes(routes!(unit::create_unit, unit::get_units))
        .routes(routes!(unit::bulk_create_units))
        .routes(routes!(unit::get_unit, unit::update_unit, unit::delete_unit))
        .routes(routes!(tenant::create_tenant, tenant::get_tenants))
        .routes(routes!(
            tenant::get_tenant,
            tenant::update_tenant,
            tenant::delete_tenant
        ))
        .routes(routes!(lease::create_lease, lease::get_leases))
        .routes(routes!(lease::get_lease))
        .routes(routes!(lease::terminate_lease))
        .routes(routes!(invoice::create_invoice, invoice::get_invoices))
        .routes(routes!(invoice::get_invoice, invoice::update_invoice))
        .routes(routes!(invoice::cancel_invoice))
        .routes(routes!(invoice::generate_invoices))
        .routes(routes!(invoice::mark_overdue))
        .routes(routes!(payment::record_payment, payment::get_payments))
        .routes(routes!(payment::get_payment))
        .routes(routes!(payment::void_payment))
        .routes(routes!(
            payment_intent::create_payment_intent,
            payment_intent::get_payment_intents
        ))
        .routes(routes!(payment_intent::get_payment_intent))
        .routes(routes!(payment_intent::confirm_payment_intent))
        .routes(routes!(payment_intent::cancel_payment_intent))
        .routes(routes!(space::create_space, space::get_spaces))
        .routes(routes!(space::bulk_create_spaces))
        .routes(routes!(
            space::get_space,
            space::update_space,
            space::delete_space
        ))
        .routes(routes!(pricing::set_pricing, pricing::get_pricing))
        .routes(routes!(
            assignment::create_assignment,
            assignment::get_assignments
        ))
        .routes(routes!(assignment::get_assignment))
        .routes(routes!(assignment::end_assignment))
        .routes(routes!(assignment::estimate_assignment))
        .routes(routes!(
            violation::issue_violation,
            violation::get_violations
        ))
        .routes(routes!(violation::get_violation))
        .routes(routes!(violation::resolve_violation))
        .routes(routes!(visitor::check_in, visitor::get_visits))
        .routes(routes!(visitor::get_visit))
        .routes(routes!(visitor::check_out))
        .routes(routes!(visitor::get_analytics))
        .routes(routes!(
            complaint::create_complaint,
            complaint::get_complaints
        ))
        .routes(routes!(complaint::get_complaint))
        .routes(routes!(complaint::update_complaint_status))
        .routes(routes!(complaint::convert_to_work_order))
        .routes(routes!(
            work_order::create_work_order,
            work_order::get_work_orders
        ))
        .routes(routes!(work_order::get_work_order))
        .routes(routes!(work_order::assign_work_order))
        .routes(routes!(work_order::update_work_order_status))
        .routes(routes!(report::get_dashboard))
        .routes(routes!(report::get_revenue))
        .split_for_parts();

    router.route("/api/openapi.json", get(move || async move { Json(api) }))
}
