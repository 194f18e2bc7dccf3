// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated time of day and schedule execution.
//!
//! A [`ScheduleClock`] keeps the current hour. Each [`tick`](ScheduleClock::tick)
//! advances it by one hour (wrapping after 23:00) and applies the action every
//! device has scheduled for the new hour. Ticks are driven either manually or
//! by a [`ClockDriver`] on a fixed period.
//!
//! # Examples
//!
//! ```
//! use smarthome_lib::{Device, Home, ScheduleClock};
//! use smarthome_lib::types::ScheduledAction;
//!
//! let mut plug = Device::plug(10)?;
//! plug.set_action_at_hour(1, ScheduledAction::TurnOn)?;
//!
//! let mut home = Home::new();
//! home.add_device(plug);
//!
//! let mut clock = ScheduleClock::new();
//! let report = clock.tick(&mut home);
//!
//! assert_eq!(clock.time_label(), "01:00");
//! assert_eq!(report.touched, vec![0]);
//! assert!(home.get_device_at(0)?.is_on());
//! # Ok::<(), smarthome_lib::Error>(())
//! ```

mod driver;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::event::HomeEvent;
use crate::home::Home;
use crate::state::StateChange;
use crate::types::{Hour, PowerState};

pub use driver::{
    ClockDriver, ClockHandle, DEFAULT_TICK_PERIOD, DriverConfig, MAX_TICK_PERIOD,
    MIN_TICK_PERIOD, SharedHome,
};

/// Outcome of a single clock tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// The hour the clock advanced to.
    pub hour: Hour,
    /// Devices with a turn-on or turn-off action at this hour.
    pub touched: Vec<usize>,
    /// The subset of `touched` whose power state actually flipped.
    pub changed: Vec<usize>,
}

/// Hourly clock that runs device schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleClock {
    hour: Hour,
}

impl ScheduleClock {
    /// Creates a clock at 00:00.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(Hour::MIDNIGHT)
    }

    /// Creates a clock at the given hour.
    #[must_use]
    pub const fn starting_at(hour: Hour) -> Self {
        Self { hour }
    }

    /// Returns the current hour.
    #[must_use]
    pub const fn hour(&self) -> Hour {
        self.hour
    }

    /// Returns the current hour as a time of day.
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour.value()), 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Returns the current hour formatted as `HH:00`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.hour.to_string()
    }

    /// Advances one hour and applies the scheduled actions for it.
    ///
    /// Every device scheduled to turn on or off at the new hour receives the
    /// action, even if it is already in that state. Devices with no action
    /// are left alone.
    pub fn tick(&mut self, home: &mut Home) -> TickReport {
        self.hour = self.hour.next();
        let hour = self.hour;

        let targets: Vec<(usize, PowerState)> = home
            .devices()
            .iter()
            .enumerate()
            .filter_map(|(index, device)| {
                device
                    .schedule()
                    .get(hour)
                    .target_state()
                    .map(|state| (index, state))
            })
            .collect();

        let touched: Vec<usize> = targets.iter().map(|(index, _)| *index).collect();
        let mut changed = Vec::new();
        for &(index, state) in &targets {
            if home.apply_unchecked(index, &StateChange::Power(state)) {
                changed.push(index);
            }
        }

        tracing::debug!(
            %hour,
            touched = touched.len(),
            changed = changed.len(),
            "Clock ticked"
        );
        home.publish(HomeEvent::ClockTicked {
            hour,
            touched: touched.clone(),
        });

        TickReport {
            hour,
            touched,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::types::ScheduledAction;

    fn hour(h: i64) -> Hour {
        Hour::new(h).unwrap()
    }

    #[test]
    fn starts_at_midnight() {
        let clock = ScheduleClock::new();
        assert_eq!(clock.hour(), Hour::MIDNIGHT);
        assert_eq!(clock.time_label(), "00:00");
        assert_eq!(clock.time(), NaiveTime::MIN);
    }

    #[test]
    fn wraps_after_24_ticks() {
        let mut home = Home::new();
        let mut clock = ScheduleClock::new();
        for _ in 0..24 {
            clock.tick(&mut home);
        }
        assert_eq!(clock.hour(), Hour::MIDNIGHT);
    }

    #[test]
    fn starting_at_sets_time() {
        let clock = ScheduleClock::starting_at(hour(13));
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(clock.time_label(), "13:00");
    }

    #[test]
    fn tick_applies_new_hour_only() {
        let mut plug = Device::plug(20).unwrap();
        plug.set_action_at_hour(0, ScheduledAction::TurnOn).unwrap();
        let mut home = Home::new();
        home.add_device(plug);

        let mut clock = ScheduleClock::new();
        let report = clock.tick(&mut home);

        assert_eq!(report.hour, hour(1));
        assert!(report.touched.is_empty());
        assert!(!home.devices()[0].is_on());
    }

    #[test]
    fn tick_reports_touched_and_changed() {
        let mut home = Home::new();
        for _ in 0..3 {
            home.add_device(Device::doorbell());
        }
        home.set_action_at(0, 1, ScheduledAction::TurnOn).unwrap();
        home.set_action_at(1, 1, ScheduledAction::TurnOn).unwrap();
        home.toggle_at(1).unwrap();

        let report = ScheduleClock::new().tick(&mut home);
        assert_eq!(report.touched, vec![0, 1]);
        assert_eq!(report.changed, vec![0]);
        assert!(!home.devices()[2].is_on());
    }

    #[test]
    fn tick_applies_mixed_actions_in_index_order() {
        let mut home = Home::new();
        home.add_device(Device::plug(10).unwrap());
        home.add_device(Device::doorbell());
        home.add_device(Device::plug(20).unwrap());
        home.set_action_at(0, 9, ScheduledAction::TurnOff).unwrap();
        home.set_action_at(2, 9, ScheduledAction::TurnOn).unwrap();
        home.toggle_at(0).unwrap();
        let mut rx = home.subscribe();

        let report = ScheduleClock::starting_at(hour(8)).tick(&mut home);

        assert_eq!(report.touched, vec![0, 2]);
        assert_eq!(report.changed, vec![0, 2]);
        assert!(!home.devices()[0].is_on());
        assert!(!home.devices()[1].is_on());
        assert!(home.devices()[2].is_on());
        assert_eq!(
            rx.try_recv().unwrap(),
            HomeEvent::state_changed(0, StateChange::power_off())
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            HomeEvent::state_changed(2, StateChange::power_on())
        );
    }

    #[test]
    fn tick_publishes_event() {
        let mut home = Home::new();
        let mut rx = home.subscribe();
        ScheduleClock::starting_at(hour(23)).tick(&mut home);

        assert_eq!(
            rx.try_recv().unwrap(),
            HomeEvent::ClockTicked {
                hour: Hour::MIDNIGHT,
                touched: vec![],
            }
        );
    }
}
