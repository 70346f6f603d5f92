use std::sync::Arc;
use turnstile_order::TicketService;

#[derive(Clone)]
pub struct AppState {
    pub ticket_service: Arc<TicketService>,
}
