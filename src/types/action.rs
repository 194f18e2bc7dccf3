// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scheduled action stored in each hourly slot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PowerState;
use super::power::{CSV_FALSE, CSV_TRUE};
use crate::error::ValueError;

/// Literal used for an empty slot in exported rows.
pub const CSV_NONE: &str = "None";

/// What a device should do when the clock reaches a given hour.
///
/// | Variant    | CSV token | Label       |
/// |------------|-----------|-------------|
/// | `TurnOff`  | `False`   | `Turn Off`  |
/// | `TurnOn`   | `True`    | `Turn On`   |
/// | `NoChange` | `None`    | `No Change` |
///
/// # Examples
///
/// ```
/// use smarthome_lib::types::{PowerState, ScheduledAction};
///
/// let action: ScheduledAction = "True".parse().unwrap();
/// assert_eq!(action, ScheduledAction::TurnOn);
/// assert_eq!(action.target_state(), Some(PowerState::On));
///
/// assert_eq!(ScheduledAction::NoChange.as_csv_token(), "None");
/// assert!("maybe".parse::<ScheduledAction>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledAction {
    /// Switch the device off.
    TurnOff,
    /// Switch the device on.
    TurnOn,
    /// Leave the device as it is.
    #[default]
    NoChange,
}

impl ScheduledAction {
    /// All actions, in the order the schedule editor lists them.
    pub const ALL: [Self; 3] = [Self::TurnOff, Self::TurnOn, Self::NoChange];

    /// Returns the CSV token (`False`, `True` or `None`).
    #[must_use]
    pub const fn as_csv_token(&self) -> &'static str {
        match self {
            Self::TurnOff => CSV_FALSE,
            Self::TurnOn => CSV_TRUE,
            Self::NoChange => CSV_NONE,
        }
    }

    /// Returns the human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TurnOff => "Turn Off",
            Self::TurnOn => "Turn On",
            Self::NoChange => "No Change",
        }
    }

    /// Returns the power state this action forces, if any.
    #[must_use]
    pub const fn target_state(&self) -> Option<PowerState> {
        match self {
            Self::TurnOff => Some(PowerState::Off),
            Self::TurnOn => Some(PowerState::On),
            Self::NoChange => None,
        }
    }

    /// Returns `true` for `NoChange`.
    #[must_use]
    pub const fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }
}

impl fmt::Display for ScheduledAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScheduledAction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CSV_FALSE => Ok(Self::TurnOff),
            CSV_TRUE => Ok(Self::TurnOn),
            CSV_NONE => Ok(Self::NoChange),
            other => Err(ValueError::InvalidAction(other.to_string())),
        }
    }
}

impl From<Option<bool>> for ScheduledAction {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(false) => Self::TurnOff,
            Some(true) => Self::TurnOn,
            None => Self::NoChange,
        }
    }
}

impl From<ScheduledAction> for Option<bool> {
    fn from(action: ScheduledAction) -> Self {
        action.target_state().map(|s| s.is_on())
    }
}
