// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic clock driver.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::home::Home;
use crate::types::Hour;

use super::ScheduleClock;

/// Default wall-clock time between two simulated hours.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(3);

/// Shortest tick period the driver uses.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Longest tick period the driver uses.
pub const MAX_TICK_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// A home shared between the clock driver and other tasks.
pub type SharedHome = Arc<Mutex<Home>>;

/// Configuration for a [`ClockDriver`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smarthome_lib::clock::DriverConfig;
/// use smarthome_lib::types::Hour;
///
/// let config = DriverConfig::default()
///     .with_period(Duration::from_millis(500))
///     .with_start_hour(Hour::new(6).unwrap());
/// assert_eq!(config.period, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Time between ticks.
    pub period: Duration,
    /// Hour the clock starts at.
    pub start_hour: Hour,
}

impl DriverConfig {
    /// Sets the tick period.
    ///
    /// The driver clamps it to `MIN_TICK_PERIOD..=MAX_TICK_PERIOD`.
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Sets the starting hour.
    #[must_use]
    pub fn with_start_hour(mut self, hour: Hour) -> Self {
        self.start_hour = hour;
        self
    }

    /// Reads a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is malformed, the start
    /// hour is out of range, or the period is outside
    /// [`MIN_TICK_PERIOD`]..=[`MAX_TICK_PERIOD`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        if !(MIN_TICK_PERIOD..=MAX_TICK_PERIOD).contains(&config.period) {
            return Err(Error::Config(format!(
                "period must be between {MIN_TICK_PERIOD:?} and {MAX_TICK_PERIOD:?}, got {:?}",
                config.period
            )));
        }
        Ok(config)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_TICK_PERIOD,
            start_hour: Hour::MIDNIGHT,
        }
    }
}

/// Runs a [`ScheduleClock`] against a shared home on a fixed period.
///
/// Each tick locks the home for the duration of the tick, so edits made by
/// other tasks never interleave with a running schedule step.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use smarthome_lib::{ClockDriver, Home};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let home = Arc::new(Mutex::new(Home::new()));
///     let handle = ClockDriver::new(Arc::clone(&home)).spawn();
///
///     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
///     let clock = handle.stop().await;
///     println!("stopped at {:?}", clock.map(|c| c.time_label()));
/// }
/// ```
#[derive(Debug)]
pub struct ClockDriver {
    home: SharedHome,
    config: DriverConfig,
}

impl ClockDriver {
    /// Creates a driver with the default configuration.
    #[must_use]
    pub fn new(home: SharedHome) -> Self {
        Self::with_config(home, DriverConfig::default())
    }

    /// Creates a driver with the given configuration.
    #[must_use]
    pub fn with_config(home: SharedHome, config: DriverConfig) -> Self {
        Self { home, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Starts ticking on the current tokio runtime.
    ///
    /// The first tick happens one period after this call.
    #[must_use]
    pub fn spawn(self) -> ClockHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let clock = ScheduleClock::starting_at(self.config.start_hour);
        tracing::debug!(
            period = ?self.config.period,
            start = %self.config.start_hour,
            "Starting clock driver"
        );
        let task = tokio::spawn(run(self.home, clock, self.config.period, shutdown_rx));
        ClockHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running [`ClockDriver`].
///
/// Dropping the handle also stops the driver at its next wake-up.
#[derive(Debug)]
pub struct ClockHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<ScheduleClock>,
}

impl ClockHandle {
    /// Stops the driver and returns the clock as it was after the last tick.
    ///
    /// Returns `None` if the driver task panicked or was aborted.
    pub async fn stop(self) -> Option<ScheduleClock> {
        let _ = self.shutdown.send(true);
        self.task.await.ok()
    }

    /// Returns `true` if the driver task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

async fn run(
    home: SharedHome,
    mut clock: ScheduleClock,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> ScheduleClock {
    let period = period.clamp(MIN_TICK_PERIOD, MAX_TICK_PERIOD);
    let now = Instant::now();
    let start = now.checked_add(period).unwrap_or(now);
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                // A dropped sender also ends the loop
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let report = clock.tick(&mut home.lock());
                tracing::trace!(hour = %report.hour, changed = ?report.changed, "Driver tick");
            }
        }
    }

    tracing::debug!(hour = %clock.hour(), "Clock driver stopped");
    clock
}
