// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart devices.
//!
//! A [`Device`] carries the state every device shares (power state and an
//! hourly [`Schedule`]) plus a [`DeviceKind`] holding the variant-specific
//! attributes:
//!
//! - [`Plug`] - a consumption rate bounded to 0-150
//! - [`Doorbell`] - a sleep mode flag
//!
//! # Examples
//!
//! ```
//! use smarthome_lib::Device;
//! use smarthome_lib::types::ScheduledAction;
//!
//! let mut plug = Device::plug(45)?;
//! plug.toggle();
//! assert!(plug.is_on());
//!
//! plug.set_action_at_hour(7, ScheduledAction::TurnOff)?;
//! assert!(plug.set_action_at_hour(24, ScheduledAction::TurnOn).is_err());
//!
//! if let Some(p) = plug.as_plug_mut() {
//!     p.set_consumption_rate(150)?;
//! }
//! # Ok::<(), smarthome_lib::Error>(())
//! ```

mod doorbell;
mod plug;
mod schedule;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::csv::{CsvFormat, FIELD_SEPARATOR};
use crate::error::{ParseError, Result};
use crate::state::StateChange;
use crate::types::{ConsumptionRate, Hour, PowerState, ScheduledAction, csv_bool};

pub use doorbell::Doorbell;
pub use plug::Plug;
pub use schedule::{SLOT_TERMINATOR, Schedule};

/// Type tag written in the first CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// A smart plug.
    SmartPlug,
    /// A smart doorbell.
    SmartDoorbell,
}

impl DeviceType {
    /// Returns the CSV type tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SmartPlug => "SmartPlug",
            Self::SmartDoorbell => "SmartDoorbell",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SmartPlug" => Ok(Self::SmartPlug),
            "SmartDoorbell" => Ok(Self::SmartDoorbell),
            other => Err(ParseError::UnknownDeviceType(other.to_string())),
        }
    }
}

/// Variant-specific attributes of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Smart plug attributes.
    Plug(Plug),
    /// Smart doorbell attributes.
    Doorbell(Doorbell),
}

impl DeviceKind {
    /// Returns the type tag for this variant.
    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        match self {
            Self::Plug(_) => DeviceType::SmartPlug,
            Self::Doorbell(_) => DeviceType::SmartDoorbell,
        }
    }

    /// Returns the last CSV column: the rate for plugs, the sleep flag for
    /// doorbells.
    #[must_use]
    pub fn csv_value(&self) -> String {
        match self {
            Self::Plug(plug) => plug.consumption_rate().to_string(),
            Self::Doorbell(bell) => csv_bool(bell.sleep()).to_string(),
        }
    }
}

impl From<Plug> for DeviceKind {
    fn from(plug: Plug) -> Self {
        Self::Plug(plug)
    }
}

impl From<Doorbell> for DeviceKind {
    fn from(bell: Doorbell) -> Self {
        Self::Doorbell(bell)
    }
}

/// A smart device owned by a [`Home`](crate::Home).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    power: PowerState,
    schedule: Schedule,
    kind: DeviceKind,
}

impl Device {
    /// Creates a switched-off device with an empty schedule.
    #[must_use]
    pub fn new(kind: impl Into<DeviceKind>) -> Self {
        Self {
            power: PowerState::Off,
            schedule: Schedule::new(),
            kind: kind.into(),
        }
    }

    /// Creates a smart plug.
    ///
    /// # Errors
    ///
    /// Returns a range error if `consumption_rate` is outside [0, 150].
    pub fn plug(consumption_rate: i64) -> Result<Self> {
        Ok(Self::new(Plug::new(consumption_rate)?))
    }

    /// Creates a smart plug from an already validated rate.
    #[must_use]
    pub fn plug_with(consumption_rate: ConsumptionRate) -> Self {
        Self::new(Plug::with_rate(consumption_rate))
    }

    /// Creates a smart doorbell with sleep mode off.
    #[must_use]
    pub fn doorbell() -> Self {
        Self::new(Doorbell::new())
    }

    // ========== Power State ==========

    /// Flips the power state.
    pub fn toggle(&mut self) {
        self.power = self.power.toggled();
    }

    /// Returns `true` when the device is switched on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Returns the power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Switches the device on or off.
    ///
    /// Returns `true` if the state changed.
    pub fn set_on(&mut self, on: bool) -> bool {
        let target = PowerState::from(on);
        let changed = self.power != target;
        self.power = target;
        changed
    }

    // ========== Schedule ==========

    /// Returns the hourly schedule.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the action scheduled at `hour`.
    ///
    /// # Errors
    ///
    /// Returns a range error if `hour` is outside [0, 23].
    pub fn action_at_hour(&self, hour: i64) -> Result<ScheduledAction> {
        Ok(self.schedule.get(Hour::new(hour)?))
    }

    /// Sets the action for `hour`. [`ScheduledAction::NoChange`] clears the
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns a range error if `hour` is outside [0, 23]; the schedule is
    /// left unchanged.
    pub fn set_action_at_hour(&mut self, hour: i64, action: ScheduledAction) -> Result<()> {
        let hour = Hour::new(hour)?;
        self.schedule.set(hour, action);
        Ok(())
    }

    /// Replaces the whole schedule.
    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    // ========== Variant ==========

    /// Returns the variant-specific attributes.
    #[must_use]
    pub const fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        self.kind.device_type()
    }

    /// Returns the plug attributes, if this is a plug.
    #[must_use]
    pub const fn as_plug(&self) -> Option<&Plug> {
        match &self.kind {
            DeviceKind::Plug(plug) => Some(plug),
            DeviceKind::Doorbell(_) => None,
        }
    }

    /// Returns the plug attributes mutably, if this is a plug.
    pub fn as_plug_mut(&mut self) -> Option<&mut Plug> {
        match &mut self.kind {
            DeviceKind::Plug(plug) => Some(plug),
            DeviceKind::Doorbell(_) => None,
        }
    }

    /// Returns the doorbell attributes, if this is a doorbell.
    #[must_use]
    pub const fn as_doorbell(&self) -> Option<&Doorbell> {
        match &self.kind {
            DeviceKind::Doorbell(bell) => Some(bell),
            DeviceKind::Plug(_) => None,
        }
    }

    /// Returns the doorbell attributes mutably, if this is a doorbell.
    pub fn as_doorbell_mut(&mut self) -> Option<&mut Doorbell> {
        match &mut self.kind {
            DeviceKind::Doorbell(bell) => Some(bell),
            DeviceKind::Plug(_) => None,
        }
    }

    // ========== State Changes ==========

    /// Applies a state change and returns whether the device actually changed.
    ///
    /// Variant-specific changes addressed to the other variant are ignored.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(state) => self.set_on(state.is_on()),
            StateChange::ConsumptionRate(rate) => {
                self.as_plug_mut().is_some_and(|plug| plug.set_rate(*rate))
            }
            StateChange::SleepMode(mode) => self
                .as_doorbell_mut()
                .is_some_and(|bell| bell.set_sleep(*mode)),
            StateChange::ScheduleSlot { hour, action } => {
                self.schedule.set(*hour, *action) != *action
            }
            StateChange::Batch(changes) => {
                let mut any_changed = false;
                for c in changes {
                    if self.apply(c) {
                        any_changed = true;
                    }
                }
                any_changed
            }
        }
    }

    // ========== CSV ==========

    /// Renders this device as one CSV row (without the line terminator).
    ///
    /// # Examples
    ///
    /// ```
    /// use smarthome_lib::{CsvFormat, Device};
    ///
    /// let plug = Device::plug(45).unwrap();
    /// assert_eq!(plug.to_csv_row(CsvFormat::Basic), "SmartPlug, False, 45");
    /// ```
    #[must_use]
    pub fn to_csv_row(&self, format: CsvFormat) -> String {
        let mut fields = vec![
            self.device_type().as_str().to_string(),
            self.power.as_csv_token().to_string(),
        ];
        if format.has_schedule() {
            fields.push(self.schedule.to_csv_text());
        }
        fields.push(self.kind.csv_value());
        fields.join(FIELD_SEPARATOR)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.device_type())?;
        write!(f, "\n   switched on: {}", self.power)?;
        match &self.kind {
            DeviceKind::Plug(plug) => {
                write!(f, "\n   consumption rate: {}", plug.consumption_rate())?;
            }
            DeviceKind::Doorbell(bell) => {
                write!(f, "\n   sleep mode: {}", csv_bool(bell.sleep()))?;
            }
        }
        let mut scheduled = self.schedule.scheduled_hours().peekable();
        if scheduled.peek().is_some() {
            f.write_str("\n   schedule:")?;
            for (hour, action) in scheduled {
                write!(f, " {hour} {action};")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValueError};

    #[test]
    fn new_device_is_off_with_empty_schedule() {
        for device in [Device::plug(0).unwrap(), Device::doorbell()] {
            assert!(!device.is_on());
            assert!(device.schedule().is_empty());
        }
    }

    #[test]
    fn plug_constructor_validates_rate() {
        assert!(matches!(
            Device::plug(151),
            Err(Error::Value(ValueError::OutOfRange { actual: 151, .. }))
        ));
        assert!(Device::plug(-1).is_err());
    }

    #[test]
    fn toggle_twice_restores_state() {
        for mut device in [Device::plug(45).unwrap(), Device::doorbell()] {
            let before = device.is_on();
            device.toggle();
            assert_ne!(device.is_on(), before);
            device.toggle();
            assert_eq!(device.is_on(), before);
        }
    }

    #[test]
    fn set_on_reports_change() {
        let mut device = Device::doorbell();
        assert!(device.set_on(true));
        assert!(!device.set_on(true));
        assert!(device.is_on());
    }

    #[test]
    fn set_action_at_hour_validates_hour() {
        let mut device = Device::doorbell();
        for hour in [-1, 24, 100] {
            assert!(matches!(
                device.set_action_at_hour(hour, ScheduledAction::TurnOn),
                Err(Error::Value(ValueError::OutOfRange { .. }))
            ));
        }
        assert!(device.schedule().is_empty());
    }

    #[test]
    fn schedule_reflects_latest_action() {
        let mut device = Device::plug(10).unwrap();
        device.set_action_at_hour(5, ScheduledAction::TurnOn).unwrap();
        device.set_action_at_hour(5, ScheduledAction::TurnOff).unwrap();
        assert_eq!(device.action_at_hour(5).unwrap(), ScheduledAction::TurnOff);

        device.set_action_at_hour(5, ScheduledAction::NoChange).unwrap();
        assert!(device.schedule().is_empty());
    }

    #[test]
    fn typed_access_matches_variant() {
        let mut plug = Device::plug(12).unwrap();
        assert!(plug.as_doorbell().is_none());
        assert_eq!(plug.as_plug().map(|p| p.consumption_rate().value()), Some(12));
        assert!(plug.as_plug_mut().is_some());

        let mut bell = Device::doorbell();
        assert!(bell.as_plug_mut().is_none());
        assert_eq!(bell.device_type(), DeviceType::SmartDoorbell);
    }

    #[test]
    fn apply_ignores_wrong_variant() {
        let mut bell = Device::doorbell();
        let change = StateChange::ConsumptionRate(ConsumptionRate::MAX);
        assert!(!bell.apply(&change));
        assert_eq!(bell, Device::doorbell());
    }

    #[test]
    fn apply_batch_changes() {
        let mut plug = Device::plug(0).unwrap();
        let hour = Hour::new(8).unwrap();
        let changes = StateChange::Batch(vec![
            StateChange::power_on(),
            StateChange::ConsumptionRate(ConsumptionRate::new(90).unwrap()),
            StateChange::schedule_slot(hour, ScheduledAction::TurnOn),
        ]);

        assert!(plug.apply(&changes));
        assert!(plug.is_on());
        assert_eq!(plug.as_plug().unwrap().consumption_rate().value(), 90);
        assert_eq!(plug.schedule().get(hour), ScheduledAction::TurnOn);

        // Same batch again is a no-op
        assert!(!plug.apply(&changes));
    }

    #[test]
    fn csv_rows() {
        let mut plug = Device::plug(45).unwrap();
        plug.toggle();
        assert_eq!(plug.to_csv_row(CsvFormat::Basic), "SmartPlug, True, 45");

        let mut bell = Device::doorbell();
        bell.as_doorbell_mut().unwrap().set_sleep(true);
        assert_eq!(
            bell.to_csv_row(CsvFormat::Scheduled),
            format!("SmartDoorbell, False, {}, True", "None;".repeat(24))
        );
    }

    #[test]
    fn device_type_from_str() {
        assert_eq!("SmartPlug".parse::<DeviceType>(), Ok(DeviceType::SmartPlug));
        assert_eq!(
            "SmartToaster".parse::<DeviceType>(),
            Err(ParseError::UnknownDeviceType("SmartToaster".to_string()))
        );
    }

    #[test]
    fn display_summary() {
        let mut plug = Device::plug(45).unwrap();
        plug.toggle();
        assert_eq!(
            plug.to_string(),
            "SmartPlug\n   switched on: True\n   consumption rate: 45"
        );

        let mut bell = Device::doorbell();
        bell.set_action_at_hour(6, ScheduledAction::TurnOn).unwrap();
        assert_eq!(
            bell.to_string(),
            "SmartDoorbell\n   switched on: False\n   sleep mode: False\n   schedule: 06:00 Turn On;"
        );
    }
}
