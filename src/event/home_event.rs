// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home event types.

use serde::{Deserialize, Serialize};

use crate::state::StateChange;
use crate::types::Hour;

/// Events emitted by a [`Home`](crate::Home).
///
/// Devices are identified by their index at the time the event was published.
///
/// # Examples
///
/// ```
/// use smarthome_lib::event::HomeEvent;
/// use smarthome_lib::state::StateChange;
///
/// let added = HomeEvent::device_added(0);
/// assert!(added.is_lifecycle());
///
/// let changed = HomeEvent::state_changed(0, StateChange::power_on());
/// assert_eq!(changed.device_index(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeEvent {
    /// A device was appended.
    DeviceAdded {
        /// Index of the new device.
        index: usize,
    },

    /// A device was removed; later devices shifted down by one.
    DeviceRemoved {
        /// Index the device had before removal.
        index: usize,
    },

    /// A device's state changed.
    StateChanged {
        /// Index of the device.
        index: usize,
        /// What changed.
        change: StateChange,
    },

    /// The whole collection was replaced or extended from CSV text.
    Imported {
        /// Number of devices read from the text.
        count: usize,
        /// `true` when previous devices were discarded.
        replaced: bool,
    },

    /// The schedule clock advanced.
    ClockTicked {
        /// The new current hour.
        hour: Hour,
        /// Indices of the devices the scheduled action was applied to.
        touched: Vec<usize>,
    },
}

impl HomeEvent {
    /// Returns the device index this event refers to, if it refers to one.
    #[must_use]
    pub fn device_index(&self) -> Option<usize> {
        match self {
            Self::DeviceAdded { index }
            | Self::DeviceRemoved { index }
            | Self::StateChanged { index, .. } => Some(*index),
            Self::Imported { .. } | Self::ClockTicked { .. } => None,
        }
    }

    /// Returns `true` if this is a device lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if the whole device list should be re-rendered.
    #[must_use]
    pub fn affects_all(&self) -> bool {
        matches!(self, Self::Imported { .. } | Self::ClockTicked { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(index: usize) -> Self {
        Self::DeviceAdded { index }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(index: usize) -> Self {
        Self::DeviceRemoved { index }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(index: usize, change: StateChange) -> Self {
        Self::StateChanged { index, change }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_index() {
        assert_eq!(HomeEvent::device_added(2).device_index(), Some(2));
        assert_eq!(HomeEvent::device_removed(1).device_index(), Some(1));
        assert_eq!(
            HomeEvent::Imported {
                count: 3,
                replaced: true
            }
            .device_index(),
            None
        );
    }

    #[test]
    fn classification() {
        let tick = HomeEvent::ClockTicked {
            hour: Hour::MIDNIGHT,
            touched: vec![],
        };
        assert!(tick.affects_all());
        assert!(!tick.is_lifecycle());
        assert!(HomeEvent::device_removed(0).is_lifecycle());
        assert!(!HomeEvent::state_changed(0, StateChange::power_off()).affects_all());
    }
}
