use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use turnstile_core::{CurrencyScale, Money};

use crate::ticket_type::{TicketType, TicketTypeError};

/// Price and seat allocation for one ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeRule {
    /// Unit price in minor currency units
    pub price: u64,
    /// Seats taken by one ticket. Zero for infants sitting on a lap.
    pub seat_allocation: u32,
}

/// Unvalidated policy as it comes from configuration or a caller.
///
/// Numbers are signed so that a negative price reaches the validator
/// instead of failing as a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDefinition {
    pub maximum_tickets: i64,
    #[serde(default = "default_minor_units_per_major")]
    pub minor_units_per_major: i64,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    pub ticket_types: Vec<TicketTypeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeDefinition {
    pub name: String,
    pub price: i64,
    pub seat_allocation: i64,
}

impl TicketTypeDefinition {
    pub fn new(name: &str, price: i64, seat_allocation: i64) -> Self {
        Self {
            name: name.to_string(),
            price,
            seat_allocation,
        }
    }
}

fn default_minor_units_per_major() -> i64 {
    100
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

impl Default for PolicyDefinition {
    /// Adults pay 20.00 for one seat, children 10.00 for one seat, infants
    /// travel free on a lap. At most 20 tickets per purchase.
    fn default() -> Self {
        Self {
            maximum_tickets: 20,
            minor_units_per_major: default_minor_units_per_major(),
            currency_symbol: default_currency_symbol(),
            ticket_types: vec![
                TicketTypeDefinition::new("ADULT", 2000, 1),
                TicketTypeDefinition::new("CHILD", 1000, 1),
                TicketTypeDefinition::new("INFANT", 0, 0),
            ],
        }
    }
}

/// Validated, read-only purchase policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPolicy {
    maximum_tickets: u32,
    minor_units_per_major: CurrencyScale,
    currency_symbol: String,
    ticket_types: BTreeMap<TicketType, TicketTypeRule>,
}

impl TicketPolicy {
    pub fn from_definition(definition: PolicyDefinition) -> Result<Self, PolicyError> {
        let result = Self::validate(definition);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Rejected ticket policy");
        }
        result
    }

    fn validate(definition: PolicyDefinition) -> Result<Self, PolicyError> {
        let maximum_tickets = u32::try_from(definition.maximum_tickets)
            .ok()
            .filter(|max| *max >= 1)
            .ok_or(PolicyError::InvalidMaximumTickets(definition.maximum_tickets))?;

        let minor_units_per_major = u32::try_from(definition.minor_units_per_major)
            .ok()
            .and_then(|per| CurrencyScale::new(per).ok())
            .ok_or(PolicyError::InvalidMinorUnits(definition.minor_units_per_major))?;

        if definition.ticket_types.is_empty() {
            return Err(PolicyError::NoTicketTypes);
        }

        let mut ticket_types = BTreeMap::new();
        for entry in definition.ticket_types {
            let ticket_type = TicketType::parse(&entry.name)?;

            if entry.price < 0 {
                return Err(PolicyError::NegativePrice {
                    ticket_type,
                    price: entry.price,
                });
            }
            if entry.seat_allocation < 0 {
                return Err(PolicyError::NegativeSeatAllocation {
                    ticket_type,
                    seat_allocation: entry.seat_allocation,
                });
            }
            let seat_allocation = u32::try_from(entry.seat_allocation).map_err(|_| PolicyError::OutOfRange {
                field: "seat_allocation",
                value: entry.seat_allocation,
            })?;

            let rule = TicketTypeRule {
                price: entry.price as u64,
                seat_allocation,
            };
            if ticket_types.insert(ticket_type.clone(), rule).is_some() {
                return Err(PolicyError::DuplicateTicketType(ticket_type));
            }
        }

        for required in TicketType::STANDARD {
            if !ticket_types.contains_key(&required) {
                return Err(PolicyError::MissingTicketType(required));
            }
        }

        Ok(Self {
            maximum_tickets,
            minor_units_per_major,
            currency_symbol: definition.currency_symbol,
            ticket_types,
        })
    }

    pub fn maximum_tickets(&self) -> u32 {
        self.maximum_tickets
    }

    pub fn minor_units_per_major(&self) -> u32 {
        self.minor_units_per_major.get()
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn rule(&self, ticket_type: &TicketType) -> Option<&TicketTypeRule> {
        self.ticket_types.get(ticket_type)
    }

    pub fn ticket_types(&self) -> impl Iterator<Item = (&TicketType, &TicketTypeRule)> {
        self.ticket_types.iter()
    }

    /// Wrap a minor-unit amount in this policy's currency scale.
    pub fn money(&self, minor_units: u64) -> Money {
        Money::from_minor(minor_units, self.minor_units_per_major)
    }
}

impl Default for TicketPolicy {
    /// The policy built from [`PolicyDefinition::default`].
    fn default() -> Self {
        // The built-in definition is a constant that always validates.
        Self::from_definition(PolicyDefinition::default()).expect("default ticket policy is valid")
    }
}

impl TryFrom<PolicyDefinition> for TicketPolicy {
    type Error = PolicyError;

    fn try_from(definition: PolicyDefinition) -> Result<Self, Self::Error> {
        Self::from_definition(definition)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("maximumTickets must be a positive integer, got {0}")]
    InvalidMaximumTickets(i64),

    #[error("minorUnitsPerMajor must be a positive power of ten, got {0}")]
    InvalidMinorUnits(i64),

    #[error("ticketTypes must not be empty")]
    NoTicketTypes,

    #[error("ticketTypes must define {0}")]
    MissingTicketType(TicketType),

    #[error("ticket type {0} is defined more than once")]
    DuplicateTicketType(TicketType),

    #[error(transparent)]
    InvalidTicketType(#[from] TicketTypeError),

    #[error("{ticket_type} price must be a non-negative integer, got {price}")]
    NegativePrice { ticket_type: TicketType, price: i64 },

    #[error("{ticket_type} seatAllocation must be a non-negative integer, got {seat_allocation}")]
    NegativeSeatAllocation {
        ticket_type: TicketType,
        seat_allocation: i64,
    },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}
