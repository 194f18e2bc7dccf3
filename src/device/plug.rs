// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart plug attributes.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::ConsumptionRate;

/// Attributes specific to a smart plug.
///
/// # Examples
///
/// ```
/// use smarthome_lib::device::Plug;
///
/// let mut plug = Plug::new(45).unwrap();
/// plug.set_consumption_rate(42).unwrap();
/// assert_eq!(plug.consumption_rate().value(), 42);
///
/// // Rejected values leave the rate untouched
/// assert!(plug.set_consumption_rate(151).is_err());
/// assert_eq!(plug.consumption_rate().value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Plug {
    consumption_rate: ConsumptionRate,
}

impl Plug {
    /// Creates plug attributes with the given consumption rate.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the rate is outside [0, 150].
    pub fn new(consumption_rate: i64) -> Result<Self, ValueError> {
        Ok(Self::with_rate(ConsumptionRate::new(consumption_rate)?))
    }

    /// Creates plug attributes from an already validated rate.
    #[must_use]
    pub const fn with_rate(consumption_rate: ConsumptionRate) -> Self {
        Self { consumption_rate }
    }

    /// Returns the consumption rate.
    #[must_use]
    pub const fn consumption_rate(&self) -> ConsumptionRate {
        self.consumption_rate
    }

    /// Replaces the consumption rate.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the rate is outside [0, 150]; the
    /// stored rate is left unchanged.
    pub fn set_consumption_rate(&mut self, rate: i64) -> Result<(), ValueError> {
        self.consumption_rate = ConsumptionRate::new(rate)?;
        Ok(())
    }

    /// Replaces the consumption rate with an already validated value.
    ///
    /// Returns `true` if the rate changed.
    pub fn set_rate(&mut self, rate: ConsumptionRate) -> bool {
        if self.consumption_rate == rate {
            false
        } else {
            self.consumption_rate = rate;
            true
        }
    }
}
