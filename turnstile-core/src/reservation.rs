use crate::{AccountId, CollaboratorError};

/// Third-party seat booking service.
pub trait SeatReservationService: Send + Sync {
    /// Reserve `seat_count` seats for the account.
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), CollaboratorError>;
}

pub struct MockSeatReservationService;

impl SeatReservationService for MockSeatReservationService {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), CollaboratorError> {
        tracing::info!(account_id = %account_id, seat_count, "Mock seats reserved");
        Ok(())
    }
}
