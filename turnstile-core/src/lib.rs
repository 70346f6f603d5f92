pub mod account;
pub mod json;
pub mod money;
pub mod payment;
pub mod reservation;

pub use account::AccountId;
pub use money::{CurrencyScale, Money};
pub use payment::{MockPaymentService, TicketPaymentService};
pub use reservation::{MockSeatReservationService, SeatReservationService};

/// Failure reported by an external collaborator (payment gateway, seat booking).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
