use crate::{AccountId, CollaboratorError, Money};

/// Third-party payment gateway used to capture the cost of a purchase.
pub trait TicketPaymentService: Send + Sync {
    /// Charge `amount` to the account. The gateway works in major units,
    /// see [`Money::major_units`].
    fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), CollaboratorError>;
}

pub struct MockPaymentService;

impl TicketPaymentService for MockPaymentService {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), CollaboratorError> {
        // A real gateway would debit the account here.
        tracing::info!(
            account_id = %account_id,
            amount = amount.major_units(),
            "Mock payment captured"
        );
        Ok(())
    }
}
