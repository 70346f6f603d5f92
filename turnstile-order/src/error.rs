use turnstile_catalog::{PolicyError, RequestError, TicketType};
use turnstile_core::{CollaboratorError, CoreError};

/// Raised while constructing a [`crate::TicketService`]. Never raised by a purchase.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Invalid ticket policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    #[error("{0} must be provided")]
    MissingCollaborator(&'static str),
}

/// Raised by a purchase call. The caller decides whether to retry.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    #[error("at least one ticketTypeRequest must be provided")]
    NoLineItems,

    #[error("ticketTypeRequests must be a list, got {0}")]
    LineItemsNotAList(String),

    #[error("{0}")]
    InvalidAccountId(#[from] CoreError),

    #[error("ticketTypeRequest #{index} is malformed: {source}")]
    MalformedLineItem {
        index: usize,
        #[source]
        source: RequestError,
    },

    #[error("ticket type {0} is not offered")]
    UnknownTicketType(TicketType),

    #[error("at least one ADULT ticket must be purchased")]
    AdultRequired,

    #[error("maximum number of tickets allowed to be purchased at a time is {maximum}, requested {requested}")]
    TooManyTickets { requested: u64, maximum: u32 },

    #[error("purchase totals overflow")]
    TotalsOverflow,

    #[error("seat reservation failed: {0}")]
    SeatReservationFailed(#[source] CollaboratorError),

    #[error("payment failed: {0}")]
    PaymentFailed(#[source] CollaboratorError),
}

impl PurchaseError {
    /// True when the request itself was rejected, false when a collaborator failed.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::SeatReservationFailed(_) | Self::PaymentFailed(_))
    }
}
