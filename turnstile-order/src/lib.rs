pub mod error;
pub mod validation;
pub mod aggregate;
pub mod models;
pub mod service;

pub use aggregate::{aggregate, PurchaseTotals};
pub use error::{PurchaseError, SetupError};
pub use models::PurchaseSummary;
pub use service::{TicketService, TicketServiceBuilder};
