use serde::Serialize;
use turnstile_catalog::TicketPolicy;
use turnstile_core::Money;

use crate::aggregate::PurchaseTotals;

/// Confirmation returned once seats are reserved and payment is taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    message: String,
    ticket_count: u64,
    total_cost: Money,
    seats_reserved: u64,
}

impl PurchaseSummary {
    pub fn new(totals: PurchaseTotals, policy: &TicketPolicy) -> Self {
        let total_cost = policy.money(totals.price_minor);
        let message = format!(
            "You have purchased {} tickets for a total of {}{} and reserved {} seats.",
            totals.tickets,
            policy.currency_symbol(),
            total_cost,
            totals.seats
        );

        Self {
            message,
            ticket_count: totals.tickets,
            total_cost,
            seats_reserved: totals.seats,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ticket_count(&self) -> u64 {
        self.ticket_count
    }

    /// Total cost; use [`Money::major_units`] for the caller-facing figure.
    pub fn total_cost(&self) -> Money {
        self.total_cost
    }

    pub fn seats_reserved(&self) -> u64 {
        self.seats_reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let totals = PurchaseTotals {
            tickets: 3,
            price_minor: 3050,
            seats: 2,
        };
        let summary = PurchaseSummary::new(totals, &TicketPolicy::default());
        assert_eq!(
            summary.message(),
            "You have purchased 3 tickets for a total of £30.5 and reserved 2 seats."
        );
        assert_eq!(summary.total_cost().major_units(), 30.5);
    }

    #[test]
    fn test_serialized_fields() {
        let totals = PurchaseTotals {
            tickets: 1,
            price_minor: 2000,
            seats: 1,
        };
        let json = serde_json::to_value(PurchaseSummary::new(totals, &TicketPolicy::default())).unwrap();
        assert_eq!(json["ticketCount"], 1);
        assert_eq!(json["totalCost"], 20.0);
        assert_eq!(json["seatsReserved"], 1);
        assert!(json["message"].as_str().unwrap().starts_with("You have purchased 1 tickets"));
    }
}
