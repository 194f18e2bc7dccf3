// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for a single exported device row.

use crate::device::{Device, DeviceType, Doorbell, Plug, Schedule};
use crate::error::ParseError;
use crate::types::{ConsumptionRate, parse_csv_bool};

use super::{CsvFormat, FIELD_SEPARATOR};

/// Parses one device row (without its line terminator).
///
/// The row is reconstructed the way it was written: the device is built from
/// its type tag and variant value, switched on if the flag says `True`, then
/// given its schedule when the row carries one.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first field that was rejected.
///
/// # Examples
///
/// ```
/// use smarthome_lib::csv::parse_row;
///
/// let device = parse_row("SmartPlug, True, 45").unwrap();
/// assert!(device.is_on());
/// assert_eq!(device.as_plug().unwrap().consumption_rate().value(), 45);
///
/// assert!(parse_row("SmartToaster, True, 5").is_err());
/// ```
pub fn parse_row(line: &str) -> Result<Device, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let format =
        CsvFormat::from_field_count(fields.len()).ok_or(ParseError::FieldCount(fields.len()))?;

    let device_type: DeviceType = fields[0].trim().parse()?;
    let switched_on = parse_bool_field(fields[1], "switched on")?;
    let value = fields[format.field_count() - 1].trim();

    let mut device = match device_type {
        DeviceType::SmartPlug => Device::new(Plug::with_rate(value.parse::<ConsumptionRate>()?)),
        DeviceType::SmartDoorbell => {
            let mut bell = Doorbell::new();
            bell.set_sleep(parse_bool_field(value, "sleep state")?);
            Device::new(bell)
        }
    };

    if switched_on {
        device.toggle();
    }

    if format.has_schedule() {
        let schedule: Schedule = fields[2].trim().parse()?;
        device.set_schedule(schedule);
    }

    Ok(device)
}

fn parse_bool_field(text: &str, field: &'static str) -> Result<bool, ParseError> {
    parse_csv_bool(text.trim()).map_err(|source| ParseError::InvalidValue { field, source })
}
