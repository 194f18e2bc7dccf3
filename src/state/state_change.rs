// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes describe discrete edits that can be applied to a
//! [`Device`](crate::Device). The [`Home`](crate::Home) publishes them in
//! [`HomeEvent::StateChanged`](crate::event::HomeEvent::StateChanged) so a
//! presentation layer knows which row to re-render.
//!
//! # Change Types
//!
//! - [`StateChange::Power`] - Device switched on or off
//! - [`StateChange::ConsumptionRate`] - Plug rate edited
//! - [`StateChange::SleepMode`] - Doorbell sleep mode edited
//! - [`StateChange::ScheduleSlot`] - One hourly slot edited
//! - [`StateChange::Batch`] - Multiple changes grouped together
//!
//! # Examples
//!
//! ```
//! use smarthome_lib::Device;
//! use smarthome_lib::state::StateChange;
//!
//! let mut plug = Device::plug(10).unwrap();
//!
//! // Apply returns true if state actually changed
//! assert!(plug.apply(&StateChange::power_on()));
//!
//! // Applying same change again returns false
//! assert!(!plug.apply(&StateChange::power_on()));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{ConsumptionRate, Hour, PowerState, ScheduledAction};

/// Represents a change in device state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// Device switched on or off.
    Power(PowerState),

    /// Plug consumption rate changed.
    ConsumptionRate(ConsumptionRate),

    /// Doorbell sleep mode changed.
    SleepMode(bool),

    /// A schedule slot changed.
    ScheduleSlot {
        /// The hour that was edited.
        hour: Hour,
        /// The new action for that hour.
        action: ScheduledAction,
    },

    /// Multiple changes at once.
    ///
    /// Used when an edit touches several attributes together.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a power-on change.
    #[must_use]
    pub fn power_on() -> Self {
        Self::Power(PowerState::On)
    }

    /// Creates a power-off change.
    #[must_use]
    pub fn power_off() -> Self {
        Self::Power(PowerState::Off)
    }

    /// Creates a schedule slot change.
    #[must_use]
    pub fn schedule_slot(hour: Hour, action: ScheduledAction) -> Self {
        Self::ScheduleSlot { hour, action }
    }

    /// Returns `true` if this change affects the power state.
    #[must_use]
    pub fn is_power(&self) -> bool {
        match self {
            Self::Power(_) => true,
            Self::Batch(changes) => changes.iter().any(Self::is_power),
            _ => false,
        }
    }
}
