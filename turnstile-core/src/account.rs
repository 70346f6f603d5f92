use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Identifier of the purchasing account. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct AccountId(u64);

impl AccountId {
    pub fn new(raw: i64) -> CoreResult<Self> {
        if raw <= 0 {
            return Err(CoreError::ValidationError(format!(
                "accountId must be an integer greater than 0, got {}",
                raw
            )));
        }
        Ok(Self(raw as u64))
    }

    /// Parse an account id arriving as untyped JSON.
    ///
    /// JSON integers and integral floats (`7.0`) are accepted; `"7"`, `7.5`
    /// and `true` are rejected.
    pub fn from_value(value: &serde_json::Value) -> CoreResult<Self> {
        if let Some(raw) = crate::json::as_integer(value) {
            return Self::new(raw);
        }
        // u64 values above i64::MAX are still positive integers
        if let Some(raw) = value.as_u64() {
            return Ok(Self(raw));
        }
        Err(CoreError::ValidationError(format!(
            "accountId must be an integer greater than 0, got {}",
            value
        )))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = CoreError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
