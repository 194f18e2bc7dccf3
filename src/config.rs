// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for a [`Home`](crate::Home).

use serde::{Deserialize, Serialize};

use crate::csv::CsvFormat;
use crate::error::{Error, Result};
use crate::event::{DEFAULT_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY};

/// Configuration for a home.
///
/// Missing fields in a JSON document fall back to their defaults.
///
/// # Examples
///
/// ```
/// use smarthome_lib::{CsvFormat, HomeConfig};
///
/// let config = HomeConfig::default()
///     .with_csv_format(CsvFormat::Basic)
///     .with_event_capacity(16);
/// assert_eq!(config.csv_format, CsvFormat::Basic);
///
/// let loaded = HomeConfig::from_json(r#"{ "csv_format": "basic", "event_capacity": 16 }"#)?;
/// assert_eq!(loaded, config);
/// # Ok::<(), smarthome_lib::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Format used by [`Home::export_csv`](crate::Home::export_csv).
    pub csv_format: CsvFormat,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl HomeConfig {
    /// Sets the export format.
    #[must_use]
    pub fn with_csv_format(mut self, format: CsvFormat) -> Self {
        self.csv_format = format;
        self
    }

    /// Sets the event channel capacity.
    ///
    /// The event bus clamps it to `1..=MAX_CHANNEL_CAPACITY`.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Reads a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not valid JSON, a field
    /// has the wrong type, or `event_capacity` is zero or above
    /// [`MAX_CHANNEL_CAPACITY`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        if !(1..=MAX_CHANNEL_CAPACITY).contains(&config.event_capacity) {
            return Err(Error::Config(format!(
                "event_capacity must be between 1 and {MAX_CHANNEL_CAPACITY}, got {}",
                config.event_capacity
            )));
        }
        Ok(config)
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            csv_format: CsvFormat::default(),
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exports_schedules() {
        let config = HomeConfig::default();
        assert_eq!(config.csv_format, CsvFormat::Scheduled);
        assert_eq!(config.event_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = HomeConfig::from_json(r#"{ "csv_format": "basic" }"#).unwrap();
        assert_eq!(config.csv_format, CsvFormat::Basic);
        assert_eq!(config.event_capacity, DEFAULT_CHANNEL_CAPACITY);

        assert_eq!(HomeConfig::from_json("{}").unwrap(), HomeConfig::default());
    }

    #[test]
    fn from_json_rejects_capacity_out_of_range() {
        for json in [
            r#"{ "event_capacity": 18446744073709551615 }"#,
            r#"{ "event_capacity": 65537 }"#,
            r#"{ "event_capacity": 0 }"#,
        ] {
            assert!(matches!(HomeConfig::from_json(json), Err(Error::Config(_))));
        }
        let config = HomeConfig::from_json(r#"{ "event_capacity": 65536 }"#).unwrap();
        assert_eq!(config.event_capacity, MAX_CHANNEL_CAPACITY);
    }

    #[test]
    fn builder_capacity_is_clamped_by_home() {
        let config = HomeConfig::default().with_event_capacity(usize::MAX);
        let mut home = crate::Home::with_config(config);
        let mut rx = home.subscribe();
        home.add_device(crate::Device::doorbell());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn from_json_rejects_unknown_format() {
        let err = HomeConfig::from_json(r#"{ "csv_format": "xml" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
