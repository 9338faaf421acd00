pub use super::building::Entity as Building;
pub use super::complaint::Entity as Complaint;
pub use super::invoice::Entity as Invoice;
pub use super::invoice_item::Entity as InvoiceItem;
pub use super::lease::Entity as Lease;
pub use super::organization::Entity as Organization;
pub use super::parking_assignment::Entity as ParkingAssignment;
pub use super::parking_pricing::Entity as ParkingPricing;
pub use super::parking_space::Entity as ParkingSpace;
pub use super::parking_violation::Entity as ParkingViolation;
pub use super::payment::Entity as Payment;
pub use super::payment_intent::Entity as PaymentIntent;
pub use super::tenant::Entity as Tenant;
pub use super::unit::Entity as Unit;
pub use super::user::Entity as User;
pub use super::visitor_log::Entity as VisitorLog;
pub use super::work_order::Entity as WorkOrder;
