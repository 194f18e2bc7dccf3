// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for home changes.
//!
//! Every mutation made through a [`Home`](crate::Home) (and every clock
//! tick) is published on an [`EventBus`] backed by tokio's broadcast
//! channel, so a presentation layer can re-render the rows that changed.
//!
//! # Examples
//!
//! ```
//! use smarthome_lib::{Device, Home};
//! use smarthome_lib::event::HomeEvent;
//!
//! let mut home = Home::new();
//! let mut events = home.subscribe();
//!
//! home.add_device(Device::doorbell());
//! assert_eq!(events.try_recv().unwrap(), HomeEvent::device_added(0));
//! ```

mod event_bus;
mod home_event;

pub use event_bus::{DEFAULT_CHANNEL_CAPACITY, EventBus, MAX_CHANNEL_CAPACITY};
pub use home_event::HomeEvent;
