pub mod ticket_type;
pub mod request;
pub mod policy;

pub use ticket_type::{TicketType, TicketTypeError};
pub use request::{RequestError, TicketTypeRequest};
pub use policy::{PolicyDefinition, PolicyError, TicketPolicy, TicketTypeDefinition, TicketTypeRule};
