// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state and the boolean literals used by the CSV format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Literal used for `true` in exported rows.
pub const CSV_TRUE: &str = "True";

/// Literal used for `false` in exported rows.
pub const CSV_FALSE: &str = "False";

/// Parses a strict `True`/`False` literal.
///
/// # Errors
///
/// Returns `ValueError::InvalidBool` for any other text, including other
/// capitalisations.
///
/// # Examples
///
/// ```
/// use smarthome_lib::types::parse_csv_bool;
///
/// assert_eq!(parse_csv_bool("True"), Ok(true));
/// assert_eq!(parse_csv_bool("False"), Ok(false));
/// assert!(parse_csv_bool("yes").is_err());
/// ```
pub fn parse_csv_bool(s: &str) -> Result<bool, ValueError> {
    match s {
        CSV_TRUE => Ok(true),
        CSV_FALSE => Ok(false),
        other => Err(ValueError::InvalidBool(other.to_string())),
    }
}

/// Formats a boolean as its CSV literal.
#[must_use]
pub const fn csv_bool(value: bool) -> &'static str {
    if value { CSV_TRUE } else { CSV_FALSE }
}

/// Whether a device is switched on.
///
/// # Examples
///
/// ```
/// use smarthome_lib::types::PowerState;
///
/// let state = PowerState::default();
/// assert_eq!(state, PowerState::Off);
/// assert_eq!(state.toggled(), PowerState::On);
/// assert_eq!(PowerState::On.as_csv_token(), "True");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    /// Switched off.
    #[default]
    Off,
    /// Switched on.
    On,
}

impl PowerState {
    /// Returns `true` when switched on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Returns the CSV literal (`True`/`False`).
    #[must_use]
    pub const fn as_csv_token(&self) -> &'static str {
        csv_bool(self.is_on())
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_csv_token())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_csv_bool(s).map(Self::from)
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(state: PowerState) -> Self {
        state.is_on()
    }
}
