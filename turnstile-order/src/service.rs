use serde_json::Value;
use std::sync::Arc;
use turnstile_catalog::{PolicyDefinition, TicketPolicy, TicketTypeRequest};
use turnstile_core::{AccountId, SeatReservationService, TicketPaymentService};

use crate::aggregate::aggregate;
use crate::error::{PurchaseError, SetupError};
use crate::models::PurchaseSummary;
use crate::validation::{validate_purchase, validate_purchase_body, validate_untyped_purchase};

/// Validates ticket purchases, prices them and hands off to the seat and
/// payment services.
///
/// Holds no state between calls and exposes no setters, so one instance can
/// serve concurrent callers.
pub struct TicketService {
    policy: Arc<TicketPolicy>,
    payment: Arc<dyn TicketPaymentService>,
    seats: Arc<dyn SeatReservationService>,
}

impl TicketService {
    pub fn builder() -> TicketServiceBuilder {
        TicketServiceBuilder::default()
    }

    pub fn new(
        policy: PolicyDefinition,
        payment: Arc<dyn TicketPaymentService>,
        seats: Arc<dyn SeatReservationService>,
    ) -> Result<Self, SetupError> {
        Self::builder()
            .policy(policy)
            .payment_service(payment)
            .seat_reservation_service(seats)
            .build()
    }

    pub fn policy(&self) -> &TicketPolicy {
        &self.policy
    }

    /// Purchase tickets for an account.
    ///
    /// Seats are reserved before payment is taken. If the reservation fails
    /// the payment service is never called; if the payment fails the seats
    /// stay reserved and releasing them is left to the caller.
    #[tracing::instrument(skip(self, requests), fields(line_items = requests.len()))]
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseSummary, PurchaseError> {
        let account_id = validate_purchase(&self.policy, account_id, requests).inspect_err(log_rejection)?;
        self.settle(account_id, requests)
    }

    /// Same as [`Self::purchase_tickets`] for arguments that arrive as raw JSON.
    #[tracing::instrument(skip_all, fields(account_id = %account_id, line_items = requests.len()))]
    pub fn purchase_untyped(&self, account_id: &Value, requests: &[Value]) -> Result<PurchaseSummary, PurchaseError> {
        let (account_id, requests) =
            validate_untyped_purchase(&self.policy, account_id, requests).inspect_err(log_rejection)?;
        self.settle(account_id, &requests)
    }

    /// Purchase from a whole JSON body: `{"accountId": .., "ticketTypeRequests": [..]}`.
    #[tracing::instrument(skip_all, fields(account_id = %body.get("accountId").unwrap_or(&serde_json::Value::Null)))]
    pub fn purchase_body(&self, body: &Value) -> Result<PurchaseSummary, PurchaseError> {
        let (account_id, requests) = validate_purchase_body(&self.policy, body).inspect_err(log_rejection)?;
        self.settle(account_id, &requests)
    }

    fn settle(&self, account_id: AccountId, requests: &[TicketTypeRequest]) -> Result<PurchaseSummary, PurchaseError> {
        let totals = aggregate(&self.policy, requests)?;
        tracing::debug!(
            tickets = totals.tickets,
            price_minor = totals.price_minor,
            seats = totals.seats,
            "Aggregated purchase"
        );

        self.seats.reserve_seat(account_id, totals.seats).map_err(|err| {
            tracing::error!(%account_id, error = %err, "Seat reservation failed");
            PurchaseError::SeatReservationFailed(err)
        })?;

        let amount = self.policy.money(totals.price_minor);
        self.payment.make_payment(account_id, amount).map_err(|err| {
            tracing::error!(%account_id, error = %err, "Payment failed after seats were reserved");
            PurchaseError::PaymentFailed(err)
        })?;

        let summary = PurchaseSummary::new(totals, &self.policy);
        tracing::info!(%account_id, tickets = totals.tickets, "Purchase completed");
        Ok(summary)
    }
}

fn log_rejection(err: &PurchaseError) {
    tracing::warn!(error = %err, "Purchase rejected");
}

/// Assembles a [`TicketService`], rejecting missing collaborators and invalid
/// policies. Without an explicit policy the default one is used.
#[derive(Default)]
pub struct TicketServiceBuilder {
    policy: Option<PolicyDefinition>,
    payment: Option<Arc<dyn TicketPaymentService>>,
    seats: Option<Arc<dyn SeatReservationService>>,
}

impl TicketServiceBuilder {
    pub fn policy(mut self, policy: PolicyDefinition) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn payment_service(mut self, payment: Arc<dyn TicketPaymentService>) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn seat_reservation_service(mut self, seats: Arc<dyn SeatReservationService>) -> Self {
        self.seats = Some(seats);
        self
    }

    pub fn build(self) -> Result<TicketService, SetupError> {
        let payment = self
            .payment
            .ok_or(SetupError::MissingCollaborator("TicketPaymentService"))?;
        let seats = self
            .seats
            .ok_or(SetupError::MissingCollaborator("SeatReservationService"))?;
        let policy = TicketPolicy::from_definition(self.policy.unwrap_or_default())?;

        tracing::debug!(maximum_tickets = policy.maximum_tickets(), "Ticket service ready");
        Ok(TicketService {
            policy: Arc::new(policy),
            payment,
            seats,
        })
    }
}
