// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Consumption rate type for smart plugs.
//!
//! This module provides a type-safe representation of a plug's consumption
//! rate, ensuring values are always within the valid range of 0-150.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValueError};

/// Power consumption rate of a smart plug (0-150).
///
/// # Examples
///
/// ```
/// use smarthome_lib::types::ConsumptionRate;
///
/// let rate = ConsumptionRate::new(45).unwrap();
/// assert_eq!(rate.value(), 45);
///
/// assert_eq!(ConsumptionRate::MIN.value(), 0);
/// assert_eq!(ConsumptionRate::MAX.value(), 150);
///
/// // Invalid values return error
/// assert!(ConsumptionRate::new(151).is_err());
/// assert!(ConsumptionRate::new(-1).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct ConsumptionRate(u8);

impl ConsumptionRate {
    /// Minimum consumption rate.
    pub const MIN: Self = Self(0);

    /// Maximum consumption rate.
    pub const MAX: Self = Self(150);

    /// Creates a new consumption rate.
    ///
    /// # Arguments
    ///
    /// * `value` - The rate (0-150)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is negative or exceeds 150.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: i64::from(Self::MIN.0),
                max: i64::from(Self::MAX.0),
                actual: value,
            });
        }
        // Range checked above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the rate value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ConsumptionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ConsumptionRate {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConsumptionRate> for i64 {
    fn from(rate: ConsumptionRate) -> Self {
        i64::from(rate.0)
    }
}

impl FromStr for ConsumptionRate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| ParseError::NotAnInteger {
            field: "consumption rate",
            value: s.to_string(),
        })?;
        Self::new(value).map_err(|source| ParseError::InvalidValue {
            field: "consumption rate",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_valid_values() {
        for v in 0..=150 {
            let rate = ConsumptionRate::new(v).unwrap();
            assert_eq!(i64::from(rate.value()), v);
        }
    }

    #[test]
    fn rate_invalid_values() {
        assert!(ConsumptionRate::new(151).is_err());
        assert!(ConsumptionRate::new(-1).is_err());
        assert!(ConsumptionRate::new(i64::MAX).is_err());
    }

    #[test]
    fn rate_error_reports_bounds() {
        let err = ConsumptionRate::new(200).unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                min: 0,
                max: 150,
                actual: 200
            }
        );
    }

    #[test]
    fn rate_from_str() {
        assert_eq!("45".parse::<ConsumptionRate>().unwrap().value(), 45);
        assert!(matches!(
            "abc".parse::<ConsumptionRate>(),
            Err(ParseError::NotAnInteger { .. })
        ));
        assert!(matches!(
            "151".parse::<ConsumptionRate>(),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rate_default_is_zero() {
        assert_eq!(ConsumptionRate::default(), ConsumptionRate::MIN);
    }

    #[test]
    fn rate_serde_rejects_out_of_range() {
        let rate: ConsumptionRate = serde_json::from_str("150").unwrap();
        assert_eq!(rate, ConsumptionRate::MAX);
        assert!(serde_json::from_str::<ConsumptionRate>("151").is_err());
    }
}
