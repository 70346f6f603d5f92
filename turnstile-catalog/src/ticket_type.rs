use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of a ticket type, e.g. `ADULT`.
///
/// Identifiers are upper-case ASCII letters, digits and underscores and start
/// with a letter. Policies may define types beyond the three standard ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketType(Cow<'static, str>);

impl TicketType {
    pub const ADULT: TicketType = TicketType(Cow::Borrowed("ADULT"));
    pub const CHILD: TicketType = TicketType(Cow::Borrowed("CHILD"));
    pub const INFANT: TicketType = TicketType(Cow::Borrowed("INFANT"));

    /// Types every policy has to price.
    pub const STANDARD: [TicketType; 3] = [Self::ADULT, Self::CHILD, Self::INFANT];

    pub fn parse(raw: &str) -> Result<Self, TicketTypeError> {
        let mut chars = raw.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_uppercase());
        let rest_valid = chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');

        if !starts_with_letter || !rest_valid {
            return Err(TicketTypeError::Invalid(raw.to_string()));
        }
        Ok(Self(Cow::Owned(raw.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_adult(&self) -> bool {
        *self == Self::ADULT
    }
}

impl TryFrom<String> for TicketType {
    type Error = TicketTypeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<TicketType> for String {
    fn from(ticket_type: TicketType) -> Self {
        ticket_type.0.into_owned()
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketTypeError {
    #[error("Invalid ticket type identifier: {0:?}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_types() {
        assert_eq!(TicketType::parse("ADULT").unwrap(), TicketType::ADULT);
        assert_eq!(TicketType::parse("CHILD").unwrap(), TicketType::CHILD);
        assert_eq!(TicketType::parse("INFANT").unwrap(), TicketType::INFANT);
        assert!(TicketType::parse("SENIOR_65").is_ok());
    }

    #[test]
    fn test_rejects_malformed_identifiers() {
        let incorrect = ["", " ", "adult", "Adult", "ADULT ", " CHILD ", "1ADULT", "_INFANT", "CHILD-2"];
        for raw in incorrect {
            assert!(TicketType::parse(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_only_adult_is_adult() {
        assert!(TicketType::ADULT.is_adult());
        assert!(TicketType::parse("ADULT").unwrap().is_adult());
        assert!(!TicketType::CHILD.is_adult());
        assert!(!TicketType::parse("ADULTS").unwrap().is_adult());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let parsed: TicketType = serde_json::from_str("\"INFANT\"").unwrap();
        assert_eq!(parsed, TicketType::INFANT);
        assert!(serde_json::from_str::<TicketType>("\"infant\"").is_err());
    }
}
