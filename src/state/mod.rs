// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state change types.
//!
//! [`StateChange`] represents an individual edit that can be applied to a
//! [`Device`](crate::Device) with [`Device::apply`](crate::Device::apply).
//!
//! # Examples
//!
//! ```
//! use smarthome_lib::Device;
//! use smarthome_lib::state::StateChange;
//!
//! let mut bell = Device::doorbell();
//! bell.apply(&StateChange::SleepMode(true));
//!
//! assert_eq!(bell.as_doorbell().map(|d| d.sleep()), Some(true));
//! ```

mod state_change;

pub use state_change::StateChange;
