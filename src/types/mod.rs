// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the smart home model.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so a device can never hold an invalid attribute.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state of a device
//! - [`ConsumptionRate`] - Plug consumption rate (0-150)
//! - [`Hour`] - Hour of the day (0-23)
//! - [`ScheduledAction`] - Turn off / turn on / no change for one hour

mod action;
mod consumption;
mod hour;
mod power;

pub use action::{CSV_NONE, ScheduledAction};
pub use consumption::ConsumptionRate;
pub use hour::{HOURS_PER_DAY, Hour};
pub use power::{CSV_FALSE, CSV_TRUE, PowerState, csv_bool, parse_csv_bool};
