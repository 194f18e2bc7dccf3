// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSV import and export of device lists.
//!
//! The format is a flat, positional grammar: a header line followed by one
//! row per device, fields separated by `", "` and rows terminated by `\n`.
//!
//! | Column                | Basic | Scheduled | Contents                       |
//! |-----------------------|-------|-----------|--------------------------------|
//! | DeviceType            | 1     | 1         | `SmartPlug` or `SmartDoorbell` |
//! | Switched On           | 2     | 2         | `True` or `False`              |
//! | Schedule              | -     | 3         | 24 × `None`/`True`/`False;`    |
//! | Rate or Sleep State   | 3     | 4         | integer 0-150 or `True`/`False`|
//!
//! # Examples
//!
//! ```
//! use smarthome_lib::csv::{self, CsvFormat};
//! use smarthome_lib::Device;
//!
//! let devices = vec![Device::plug(45).unwrap(), Device::doorbell()];
//! let text = csv::export(&devices, CsvFormat::Basic);
//!
//! assert_eq!(
//!     text,
//!     "DeviceType, Switched On, Consumption Rate or Sleep State\n\
//!      SmartPlug, False, 45\n\
//!      SmartDoorbell, False, False\n"
//! );
//!
//! let parsed = csv::parse(&text).unwrap();
//! assert_eq!(parsed, devices);
//! ```

mod row_parser;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::Result;

pub use row_parser::parse_row;

/// Separator between fields of a row.
pub const FIELD_SEPARATOR: &str = ", ";

/// Header of the format without a schedule column.
pub const BASIC_HEADER: &str = "DeviceType, Switched On, Consumption Rate or Sleep State";

/// Header of the format with a schedule column.
pub const SCHEDULED_HEADER: &str =
    "DeviceType, Switched On, Schedule, Consumption Rate or Sleep State";

/// Which columns an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvFormat {
    /// Type, power state and the variant value.
    Basic,
    /// Type, power state, schedule and the variant value.
    #[default]
    Scheduled,
}

impl CsvFormat {
    /// Returns the header line for this format.
    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Basic => BASIC_HEADER,
            Self::Scheduled => SCHEDULED_HEADER,
        }
    }

    /// Returns `true` if rows carry a schedule column.
    #[must_use]
    pub const fn has_schedule(&self) -> bool {
        matches!(self, Self::Scheduled)
    }

    /// Returns the number of fields in a row.
    #[must_use]
    pub const fn field_count(&self) -> usize {
        match self {
            Self::Basic => 3,
            Self::Scheduled => 4,
        }
    }

    /// Detects the format from a field count.
    #[must_use]
    pub const fn from_field_count(count: usize) -> Option<Self> {
        match count {
            3 => Some(Self::Basic),
            4 => Some(Self::Scheduled),
            _ => None,
        }
    }
}

/// Renders devices as CSV text: the header, then one row per device in order.
#[must_use]
pub fn export(devices: &[Device], format: CsvFormat) -> String {
    let mut out = String::from(format.header());
    out.push('\n');
    for device in devices {
        out.push_str(&device.to_csv_row(format));
        out.push('\n');
    }
    out
}

/// Parses CSV text into devices.
///
/// The first line is treated as the header and skipped whatever it contains.
/// Blank lines are skipped and a trailing `\r` is ignored. Each row may use
/// either format, detected from its field count.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) with the 1-based line number
/// of the first malformed row. No partial result is returned.
pub fn parse(text: &str) -> Result<Vec<Device>> {
    let mut devices = Vec::new();
    for (idx, line) in text.split('\n').enumerate().skip(1) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        let device = parse_row(line).map_err(|e| e.at_line(idx + 1))?;
        devices.push(device);
    }
    Ok(devices)
}
