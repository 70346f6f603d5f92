use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU32;
use turnstile_core::json::as_integer;

use crate::ticket_type::{TicketType, TicketTypeError};

/// One line item of a purchase: a ticket type and how many of it.
///
/// Immutable once built. Several requests of the same type in one purchase
/// are added together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTicketTypeRequest", into = "RawTicketTypeRequest")]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    count: NonZeroU32,
}

/// Wire form of a line item, checked on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTicketTypeRequest {
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub count: i64,
}

impl TicketTypeRequest {
    pub fn new(ticket_type: TicketType, count: u32) -> Result<Self, RequestError> {
        let count = NonZeroU32::new(count).ok_or(RequestError::InvalidCount(0))?;
        Ok(Self { ticket_type, count })
    }

    /// Shorthand for the common case where the identifier is still a string.
    pub fn parse(ticket_type: &str, count: u32) -> Result<Self, RequestError> {
        Self::new(TicketType::parse(ticket_type)?, count)
    }

    /// Build a request from untyped JSON of the form `{"type": "ADULT", "count": 2}`.
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        let object = value.as_object().ok_or(RequestError::NotAnObject)?;

        let ticket_type = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(RequestError::MissingField("type"))?;
        let ticket_type = TicketType::parse(ticket_type)?;

        let count = match object.get("count") {
            None => return Err(RequestError::MissingField("count")),
            Some(raw) => {
                as_integer(raw).ok_or_else(|| RequestError::NonIntegerCount(raw.to_string()))?
            }
        };
        let count = u32::try_from(count).map_err(|_| RequestError::InvalidCount(count))?;

        Self::new(ticket_type, count)
    }

    pub fn ticket_type(&self) -> &TicketType {
        &self.ticket_type
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }
}

impl TryFrom<RawTicketTypeRequest> for TicketTypeRequest {
    type Error = RequestError;

    fn try_from(raw: RawTicketTypeRequest) -> Result<Self, Self::Error> {
        let count = u32::try_from(raw.count).map_err(|_| RequestError::InvalidCount(raw.count))?;
        Self::new(TicketType::parse(&raw.ticket_type)?, count)
    }
}

impl From<TicketTypeRequest> for RawTicketTypeRequest {
    fn from(request: TicketTypeRequest) -> Self {
        Self {
            ticket_type: request.ticket_type.into(),
            count: i64::from(request.count.get()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("ticketTypeRequest must be an object")]
    NotAnObject,

    #[error("ticketTypeRequest is missing field `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidType(#[from] TicketTypeError),

    #[error("count must be an integer, got {0}")]
    NonIntegerCount(String),

    #[error("count must be a positive integer, got {0}")]
    InvalidCount(i64),
}
