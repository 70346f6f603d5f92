use turnstile_catalog::{TicketPolicy, TicketTypeRequest};

use crate::error::PurchaseError;

/// Totals for one purchase, price kept in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurchaseTotals {
    pub tickets: u64,
    pub price_minor: u64,
    pub seats: u64,
}

/// Sum tickets, price and seats over the line items using the policy's per-type rules.
///
/// Types with no seat allocation still count toward tickets and price.
pub fn aggregate(policy: &TicketPolicy, requests: &[TicketTypeRequest]) -> Result<PurchaseTotals, PurchaseError> {
    requests.iter().try_fold(PurchaseTotals::default(), |totals, request| {
        let rule = policy
            .rule(request.ticket_type())
            .ok_or_else(|| PurchaseError::UnknownTicketType(request.ticket_type().clone()))?;
        let count = u64::from(request.count());

        let price = rule.price.checked_mul(count).ok_or(PurchaseError::TotalsOverflow)?;
        let seats = u64::from(rule.seat_allocation) * count;

        Ok(PurchaseTotals {
            tickets: totals.tickets + count,
            price_minor: totals.price_minor.checked_add(price).ok_or(PurchaseError::TotalsOverflow)?,
            seats: totals.seats.checked_add(seats).ok_or(PurchaseError::TotalsOverflow)?,
        })
    })
}
