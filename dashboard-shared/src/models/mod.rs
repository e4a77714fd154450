/// Database models for the dashboard
///
/// # Models
///
/// - `user`: Dashboard login accounts
/// - `customer`: Invoiced customers
/// - `invoice`: Invoices and their payment status
/// - `revenue`: Monthly revenue totals
///
/// Each model can render its own insert [`crate::db::Statement`] under an
/// [`crate::seed::InsertPolicy`], and offers a few read queries.

pub mod customer;
pub mod invoice;
pub mod revenue;
pub mod user;

pub use customer::Customer;
pub use invoice::{Invoice, InvoiceStatus};
pub use revenue::Revenue;
pub use user::User;
