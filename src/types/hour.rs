// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hour-of-day type used to address schedule slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Number of hourly slots in a day.
pub const HOURS_PER_DAY: usize = 24;

/// An hour of the day (0-23).
///
/// # Examples
///
/// ```
/// use smarthome_lib::types::Hour;
///
/// let hour = Hour::new(5).unwrap();
/// assert_eq!(hour.value(), 5);
/// assert_eq!(hour.to_string(), "05:00");
///
/// // The clock wraps after 23:00
/// assert_eq!(Hour::new(23).unwrap().next(), Hour::MIDNIGHT);
///
/// assert!(Hour::new(24).is_err());
/// assert!(Hour::new(-1).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Hour(u8);

impl Hour {
    /// First hour of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Last valid hour value.
    pub const MAX: u8 = 23;

    /// Creates a new hour.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if hour is outside [0, 23].
    pub fn new(hour: i64) -> Result<Self, ValueError> {
        if !(0..=i64::from(Self::MAX)).contains(&hour) {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: i64::from(Self::MAX),
                actual: hour,
            });
        }
        // Range checked above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(hour as u8))
    }

    /// Returns the numeric hour.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the hour as a slot index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the following hour, wrapping from 23 back to 0.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.0 == Self::MAX {
            Self::MIDNIGHT
        } else {
            Self(self.0 + 1)
        }
    }

    /// Iterates over every hour of the day in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl TryFrom<i64> for Hour {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for i64 {
    fn from(hour: Hour) -> Self {
        i64::from(hour.0)
    }
}
