// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device collection.

use std::fmt;

use tokio::sync::broadcast;

use crate::config::HomeConfig;
use crate::csv::{self, CsvFormat};
use crate::device::{Device, DeviceType};
use crate::error::{Error, Result};
use crate::event::{EventBus, HomeEvent};
use crate::state::StateChange;
use crate::types::{ConsumptionRate, Hour, PowerState, ScheduledAction};

/// An ordered collection of devices.
///
/// Devices are addressed by their position. Indices of later devices shift
/// down by one when a device is removed. Every successful mutation is
/// published as a [`HomeEvent`] to subscribers.
///
/// # Examples
///
/// ```
/// use smarthome_lib::{Device, Home};
///
/// let mut home = Home::new();
/// home.add_device(Device::plug(45)?);
/// home.add_device(Device::doorbell());
///
/// home.toggle_at(0)?;
/// assert!(home.get_device_at(0)?.is_on());
/// assert!(home.get_device_at(2).is_err());
///
/// home.turn_on_all();
/// assert!(home.devices().iter().all(Device::is_on));
/// # Ok::<(), smarthome_lib::Error>(())
/// ```
#[derive(Debug)]
pub struct Home {
    devices: Vec<Device>,
    csv_format: CsvFormat,
    event_bus: EventBus,
}

impl Home {
    /// Creates an empty home with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HomeConfig::default())
    }

    /// Creates an empty home with the given configuration.
    #[must_use]
    pub fn with_config(config: HomeConfig) -> Self {
        Self {
            devices: Vec::new(),
            csv_format: config.csv_format,
            event_bus: EventBus::with_capacity(config.event_capacity),
        }
    }

    /// Subscribes to home events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HomeEvent> {
        self.event_bus.subscribe()
    }

    pub(crate) fn publish(&self, event: HomeEvent) {
        self.event_bus.publish(event);
    }

    // ========== Collection ==========

    /// Appends a device and returns its index.
    pub fn add_device(&mut self, device: Device) -> usize {
        let index = self.devices.len();
        tracing::debug!(index, kind = %device.device_type(), "Device added");
        self.devices.push(device);
        self.publish(HomeEvent::device_added(index));
        index
    }

    /// Returns all devices in order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if the home holds no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns the device at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if there is no such device.
    pub fn get_device_at(&self, index: usize) -> Result<&Device> {
        self.devices.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.devices.len(),
        })
    }

    /// Returns the device at `index` mutably.
    ///
    /// Changes made through this reference are not published.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if there is no such device.
    pub fn get_device_at_mut(&mut self, index: usize) -> Result<&mut Device> {
        let len = self.devices.len();
        self.devices
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Removes and returns the device at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if there is no such device; the
    /// collection is left unchanged.
    pub fn remove_device_at(&mut self, index: usize) -> Result<Device> {
        self.check_index(index)?;
        let device = self.devices.remove(index);
        tracing::debug!(index, kind = %device.device_type(), "Device removed");
        self.publish(HomeEvent::device_removed(index));
        Ok(device)
    }

    // ========== Power ==========

    /// Flips the power state of the device at `index` and returns the new
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if there is no such device.
    pub fn toggle_at(&mut self, index: usize) -> Result<PowerState> {
        let device = self.get_device_at_mut(index)?;
        device.toggle();
        let state = device.power();
        tracing::trace!(index, ?state, "Device toggled");
        self.publish(HomeEvent::state_changed(index, StateChange::Power(state)));
        Ok(state)
    }

    /// Switches every device on.
    pub fn turn_on_all(&mut self) {
        self.switch_all(PowerState::On);
    }

    /// Switches every device off.
    pub fn turn_off_all(&mut self) {
        self.switch_all(PowerState::Off);
    }

    fn switch_all(&mut self, state: PowerState) {
        let change = StateChange::Power(state);
        let mut changed = 0_usize;
        for index in 0..self.devices.len() {
            if self.apply_unchecked(index, &change) {
                changed += 1;
            }
        }
        tracing::debug!(?state, changed, "Switched all devices");
    }

    // ========== Per-device edits ==========

    /// Applies a state change to the device at `index`.
    ///
    /// Returns `true` if the device changed; only then is an event published.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if there is no such device.
    pub fn apply_at(&mut self, index: usize, change: &StateChange) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.apply_unchecked(index, change))
    }

    /// Sets the consumption rate of the plug at `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfBounds`] if there is no such device
    /// - [`Error::WrongDeviceKind`] if the device is not a plug
    /// - [`Error::Value`] if `rate` is outside [0, 150]
    pub fn set_consumption_rate_at(&mut self, index: usize, rate: i64) -> Result<()> {
        self.expect_kind(index, DeviceType::SmartPlug)?;
        let rate = ConsumptionRate::new(rate)?;
        self.apply_unchecked(index, &StateChange::ConsumptionRate(rate));
        Ok(())
    }

    /// Sets the sleep mode of the doorbell at `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfBounds`] if there is no such device
    /// - [`Error::WrongDeviceKind`] if the device is not a doorbell
    pub fn set_sleep_at(&mut self, index: usize, mode: bool) -> Result<()> {
        self.expect_kind(index, DeviceType::SmartDoorbell)?;
        self.apply_unchecked(index, &StateChange::SleepMode(mode));
        Ok(())
    }

    /// Sets the action scheduled at `hour` for the device at `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfBounds`] if there is no such device
    /// - [`Error::Value`] if `hour` is outside [0, 23]
    pub fn set_action_at(&mut self, index: usize, hour: i64, action: ScheduledAction) -> Result<()> {
        self.check_index(index)?;
        let hour = Hour::new(hour)?;
        self.apply_unchecked(index, &StateChange::schedule_slot(hour, action));
        Ok(())
    }

    // ========== Queries ==========

    /// Returns the summed consumption rate of every plug that is switched on.
    #[must_use]
    pub fn total_consumption(&self) -> u32 {
        self.devices
            .iter()
            .filter(|d| d.is_on())
            .filter_map(Device::as_plug)
            .map(|plug| u32::from(plug.consumption_rate().value()))
            .sum()
    }

    // ========== CSV ==========

    /// Returns the configured export format.
    #[must_use]
    pub const fn csv_format(&self) -> CsvFormat {
        self.csv_format
    }

    /// Changes the export format.
    pub fn set_csv_format(&mut self, format: CsvFormat) {
        self.csv_format = format;
    }

    /// Renders every device as CSV text in the configured format.
    #[must_use]
    pub fn export_csv(&self) -> String {
        csv::export(&self.devices, self.csv_format)
    }

    /// Replaces all devices with the ones described by `text`.
    ///
    /// Returns the number of devices read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for the first malformed row. The previous
    /// devices are kept when an error is returned.
    pub fn import_csv(&mut self, text: &str) -> Result<usize> {
        let devices = csv::parse(text)?;
        let count = devices.len();
        self.devices = devices;
        tracing::debug!(count, "Imported devices, replacing collection");
        self.publish(HomeEvent::Imported {
            count,
            replaced: true,
        });
        Ok(count)
    }

    /// Appends the devices described by `text` after the existing ones.
    ///
    /// Returns the number of devices read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for the first malformed row. Nothing is
    /// appended when an error is returned.
    pub fn append_csv(&mut self, text: &str) -> Result<usize> {
        let devices = csv::parse(text)?;
        let count = devices.len();
        self.devices.extend(devices);
        tracing::debug!(count, total = self.devices.len(), "Appended devices");
        self.publish(HomeEvent::Imported {
            count,
            replaced: false,
        });
        Ok(count)
    }

    // ========== Internals ==========

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.devices.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.devices.len(),
            })
        }
    }

    fn expect_kind(&self, index: usize, expected: DeviceType) -> Result<()> {
        let actual = self.get_device_at(index)?.device_type();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::WrongDeviceKind {
                index,
                expected,
                actual,
            })
        }
    }

    /// Applies `change` to an index already known to be valid.
    pub(crate) fn apply_unchecked(&mut self, index: usize, change: &StateChange) -> bool {
        let changed = self.devices[index].apply(change);
        if changed {
            self.publish(HomeEvent::state_changed(index, change.clone()));
        }
        changed
    }
}

impl Default for Home {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Home {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SmartHome")?;
        for (index, device) in self.devices.iter().enumerate() {
            write!(f, "\n{index}: {device}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;

    fn sample_home() -> Home {
        let mut home = Home::new();
        home.add_device(Device::plug(45).unwrap());
        home.add_device(Device::doorbell());
        home
    }

    #[test]
    fn new_home_is_empty() {
        let home = Home::new();
        assert!(home.is_empty());
        assert_eq!(home.len(), 0);
        assert_eq!(home.to_string(), "SmartHome");
    }

    #[test]
    fn add_device_preserves_order() {
        let mut home = Home::new();
        assert_eq!(home.add_device(Device::doorbell()), 0);
        assert_eq!(home.add_device(Device::plug(10).unwrap()), 1);
        assert_eq!(home.devices()[0].device_type(), DeviceType::SmartDoorbell);
        assert_eq!(home.devices()[1].device_type(), DeviceType::SmartPlug);
    }

    #[test]
    fn get_device_out_of_bounds() {
        let home = sample_home();
        assert_eq!(
            home.get_device_at(2).unwrap_err(),
            Error::IndexOutOfBounds { index: 2, len: 2 }
        );
    }

    #[test]
    fn remove_shifts_later_devices() {
        let mut home = sample_home();
        home.add_device(Device::plug(7).unwrap());

        let removed = home.remove_device_at(0).unwrap();
        assert_eq!(removed.device_type(), DeviceType::SmartPlug);
        assert_eq!(home.len(), 2);
        assert_eq!(home.devices()[0].device_type(), DeviceType::SmartDoorbell);
        assert_eq!(
            home.devices()[1].as_plug().unwrap().consumption_rate().value(),
            7
        );
    }

    #[test]
    fn remove_out_of_bounds_leaves_collection() {
        let mut home = sample_home();
        assert!(home.remove_device_at(5).is_err());
        assert_eq!(home.len(), 2);
    }

    #[test]
    fn toggle_at_returns_new_state() {
        let mut home = sample_home();
        assert_eq!(home.toggle_at(1).unwrap(), PowerState::On);
        assert_eq!(home.toggle_at(1).unwrap(), PowerState::Off);
        assert!(home.toggle_at(9).is_err());
    }

    #[test]
    fn turn_all_on_and_off() {
        let mut home = sample_home();
        home.toggle_at(0).unwrap();

        home.turn_on_all();
        assert!(home.devices().iter().all(Device::is_on));

        home.turn_off_all();
        assert!(home.devices().iter().all(|d| !d.is_on()));
    }

    #[test]
    fn switch_all_on_empty_home_is_noop() {
        let mut home = Home::new();
        let mut rx = home.subscribe();

        home.turn_on_all();
        assert!(home.is_empty());
        home.turn_off_all();
        assert!(home.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn set_consumption_rate_checks_kind_and_range() {
        let mut home = sample_home();
        home.set_consumption_rate_at(0, 150).unwrap();
        assert_eq!(
            home.devices()[0].as_plug().unwrap().consumption_rate().value(),
            150
        );

        assert_eq!(
            home.set_consumption_rate_at(1, 10).unwrap_err(),
            Error::WrongDeviceKind {
                index: 1,
                expected: DeviceType::SmartPlug,
                actual: DeviceType::SmartDoorbell,
            }
        );
        assert!(matches!(
            home.set_consumption_rate_at(0, 151).unwrap_err(),
            Error::Value(ValueError::OutOfRange { .. })
        ));
        assert_eq!(
            home.devices()[0].as_plug().unwrap().consumption_rate().value(),
            150
        );
    }

    #[test]
    fn set_sleep_checks_kind() {
        let mut home = sample_home();
        home.set_sleep_at(1, true).unwrap();
        assert!(home.devices()[1].as_doorbell().unwrap().sleep());
        assert!(matches!(
            home.set_sleep_at(0, true).unwrap_err(),
            Error::WrongDeviceKind { index: 0, .. }
        ));
    }

    #[test]
    fn set_action_validates_hour() {
        let mut home = sample_home();
        home.set_action_at(1, 23, ScheduledAction::TurnOn).unwrap();
        assert_eq!(
            home.devices()[1].action_at_hour(23).unwrap(),
            ScheduledAction::TurnOn
        );
        assert!(home.set_action_at(1, 24, ScheduledAction::TurnOn).is_err());
        assert!(home.set_action_at(4, 0, ScheduledAction::TurnOn).is_err());
    }

    #[test]
    fn total_consumption_counts_plugs_that_are_on() {
        let mut home = sample_home();
        home.add_device(Device::plug(100).unwrap());
        assert_eq!(home.total_consumption(), 0);

        home.turn_on_all();
        assert_eq!(home.total_consumption(), 145);

        home.toggle_at(0).unwrap();
        assert_eq!(home.total_consumption(), 100);
    }

    #[test]
    fn display_lists_devices_with_indices() {
        let mut home = sample_home();
        home.toggle_at(0).unwrap();
        assert_eq!(
            home.to_string(),
            "SmartHome\n\
             0: SmartPlug\n   switched on: True\n   consumption rate: 45\n\
             1: SmartDoorbell\n   switched on: False\n   sleep mode: False"
        );
    }

    #[test]
    fn mutations_publish_events() {
        let mut home = Home::new();
        let mut rx = home.subscribe();

        home.add_device(Device::doorbell());
        home.toggle_at(0).unwrap();
        home.set_sleep_at(0, false).unwrap();
        home.remove_device_at(0).unwrap();

        assert_eq!(rx.try_recv().unwrap(), HomeEvent::device_added(0));
        assert_eq!(
            rx.try_recv().unwrap(),
            HomeEvent::state_changed(0, StateChange::power_on())
        );
        // Sleep mode was already off, so no event for it.
        assert_eq!(rx.try_recv().unwrap(), HomeEvent::device_removed(0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn with_config_uses_format() {
        let home = Home::with_config(HomeConfig::default().with_csv_format(CsvFormat::Basic));
        assert_eq!(home.export_csv(), format!("{}\n", csv::BASIC_HEADER));
    }
}
