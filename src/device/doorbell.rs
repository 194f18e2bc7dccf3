// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart doorbell attributes.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::parse_csv_bool;

/// Attributes specific to a smart doorbell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Doorbell {
    sleep_mode: bool,
}

impl Doorbell {
    /// Creates doorbell attributes with sleep mode off.
    #[must_use]
    pub const fn new() -> Self {
        Self { sleep_mode: false }
    }

    /// Returns whether sleep mode is enabled.
    #[must_use]
    pub const fn sleep(&self) -> bool {
        self.sleep_mode
    }

    /// Sets sleep mode.
    ///
    /// Returns `true` if the value changed.
    pub fn set_sleep(&mut self, mode: bool) -> bool {
        let changed = self.sleep_mode != mode;
        self.sleep_mode = mode;
        changed
    }

    /// Sets sleep mode from a `True`/`False` literal.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidBool` for any other text; sleep mode is
    /// left unchanged.
    pub fn set_sleep_from_str(&mut self, mode: &str) -> Result<bool, ValueError> {
        let mode = parse_csv_bool(mode)?;
        Ok(self.set_sleep(mode))
    }
}
