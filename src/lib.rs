// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SmartHome` Lib - A Rust model of a home full of smart devices.
//!
//! This library keeps an ordered collection of smart plugs and smart
//! doorbells, lets every device follow an hourly on/off schedule driven by a
//! simulated clock, and saves or restores the whole collection as CSV text.
//!
//! # Supported Features
//!
//! - **Devices**: Smart plugs (consumption rate 0-150) and smart doorbells
//!   (sleep mode), each with a power state and a 24-slot schedule
//! - **Home**: Index-based add, remove, toggle, switch all on or off
//! - **CSV**: Export with or without schedules, atomic import
//! - **Clock**: Hourly ticks that apply scheduled actions, optionally driven
//!   by a tokio task
//! - **Events**: Every mutation is broadcast to subscribers
//!
//! # Quick Start
//!
//! ```
//! use smarthome_lib::{Device, Home, ScheduleClock};
//! use smarthome_lib::types::ScheduledAction;
//!
//! let mut home = Home::new();
//!
//! let mut lamp = Device::plug(60)?;
//! lamp.set_action_at_hour(6, ScheduledAction::TurnOn)?;
//! lamp.set_action_at_hour(7, ScheduledAction::TurnOff)?;
//! home.add_device(lamp);
//! home.add_device(Device::doorbell());
//!
//! let mut clock = ScheduleClock::new();
//! for _ in 0..6 {
//!     clock.tick(&mut home);
//! }
//! assert!(home.get_device_at(0)?.is_on());
//!
//! // Save and restore
//! let text = home.export_csv();
//! let mut restored = Home::new();
//! assert_eq!(restored.import_csv(&text)?, 2);
//! assert_eq!(restored.devices(), home.devices());
//! # Ok::<(), smarthome_lib::Error>(())
//! ```
//!
//! # Driving the Clock
//!
//! ```no_run
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use smarthome_lib::{ClockDriver, Home};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let home = Arc::new(Mutex::new(Home::new()));
//!     let mut events = home.lock().subscribe();
//!
//!     let driver = ClockDriver::new(Arc::clone(&home)).spawn();
//!     while let Ok(event) = events.recv().await {
//!         println!("Event: {event:?}");
//!     }
//!     driver.stop().await;
//! }
//! ```

pub mod clock;
mod config;
pub mod csv;
pub mod device;
pub mod error;
pub mod event;
mod home;
pub mod state;
pub mod types;

pub use clock::{ClockDriver, ClockHandle, DriverConfig, ScheduleClock, TickReport};
pub use config::HomeConfig;
pub use csv::CsvFormat;
pub use device::{Device, DeviceKind, DeviceType, Doorbell, Plug, Schedule};
pub use error::{Error, ParseError, Result, ValueError};
pub use home::Home;
pub use types::{ConsumptionRate, Hour, PowerState, ScheduledAction};
