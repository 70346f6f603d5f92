use serde::{Serialize, Serializer};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Minor units per major unit (100 pence to the pound). Always a power of ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CurrencyScale(u32);

impl CurrencyScale {
    pub fn new(minor_units_per_major: u32) -> CoreResult<Self> {
        let mut value = minor_units_per_major;
        if value == 0 {
            return Err(Self::invalid(minor_units_per_major));
        }
        while value % 10 == 0 {
            value /= 10;
        }
        if value != 1 {
            return Err(Self::invalid(minor_units_per_major));
        }
        Ok(Self(minor_units_per_major))
    }

    fn invalid(raw: u32) -> CoreError {
        CoreError::ValidationError(format!(
            "minorUnitsPerMajor must be a positive power of ten, got {}",
            raw
        ))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    fn fraction_digits(&self) -> usize {
        let mut digits = 0;
        let mut scale = self.0;
        while scale >= 10 {
            scale /= 10;
            digits += 1;
        }
        digits
    }
}

/// An amount held in minor currency units (e.g. pence).
///
/// All arithmetic stays in minor units. The major-unit value is derived on
/// demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    minor_units: u64,
    scale: CurrencyScale,
}

impl Money {
    pub fn from_minor(minor_units: u64, scale: CurrencyScale) -> Self {
        Self { minor_units, scale }
    }

    pub fn minor_units(&self) -> u64 {
        self.minor_units
    }

    pub fn minor_units_per_major(&self) -> u32 {
        self.scale.get()
    }

    /// Major-unit value (e.g. pounds), computed with a single division.
    pub fn major_units(&self) -> f64 {
        self.minor_units as f64 / self.scale.get() as f64
    }
}

/// Renders the major-unit amount without trailing fractional zeros: `20`, `12.5`, `0.05`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per = u64::from(self.scale.get());
        let whole = self.minor_units / per;
        let fraction = self.minor_units % per;
        if fraction == 0 {
            return write!(f, "{}", whole);
        }

        let padded = format!("{:0width$}", fraction, width = self.scale.fraction_digits());
        write!(f, "{}.{}", whole, padded.trim_end_matches('0'))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.major_units())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pence(minor_units: u64) -> Money {
        Money::from_minor(minor_units, CurrencyScale::new(100).unwrap())
    }

    #[test]
    fn test_scale_must_be_power_of_ten() {
        for ok in [1, 10, 100, 1000, 1_000_000_000] {
            assert_eq!(CurrencyScale::new(ok).unwrap().get(), ok);
        }
        for bad in [0, 2, 12, 101, 250] {
            assert!(CurrencyScale::new(bad).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_major_units() {
        assert_eq!(pence(2000).major_units(), 20.0);
        assert_eq!(pence(0).major_units(), 0.0);
        assert_eq!(pence(1250).major_units(), 12.5);
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(pence(2000).to_string(), "20");
        assert_eq!(pence(1250).to_string(), "12.5");
        assert_eq!(pence(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(1234, CurrencyScale::new(1000).unwrap()).to_string(), "1.234");
        assert_eq!(Money::from_minor(42, CurrencyScale::new(1).unwrap()).to_string(), "42");
    }

    #[test]
    fn test_serializes_as_major_units() {
        let json = serde_json::to_value(pence(3000)).unwrap();
        assert_eq!(json, serde_json::json!(30.0));
    }
}
