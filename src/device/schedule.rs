// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hourly schedule attached to every device.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{HOURS_PER_DAY, Hour, ScheduledAction};

/// Separator written after every slot in the CSV schedule column.
pub const SLOT_TERMINATOR: char = ';';

/// A 24-slot table of actions, one per hour of the day.
///
/// The length is fixed by the type; slots are addressed with [`Hour`] so an
/// out-of-range access cannot be expressed.
///
/// # Examples
///
/// ```
/// use smarthome_lib::device::Schedule;
/// use smarthome_lib::types::{Hour, ScheduledAction};
///
/// let mut schedule = Schedule::new();
/// schedule.set(Hour::new(5).unwrap(), ScheduledAction::TurnOn);
///
/// assert_eq!(schedule.get(Hour::new(5).unwrap()), ScheduledAction::TurnOn);
/// assert!(schedule.to_csv_text().starts_with("None;None;None;None;None;True;"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule([ScheduledAction; HOURS_PER_DAY]);

impl Schedule {
    /// Creates a schedule with every slot set to [`ScheduledAction::NoChange`].
    #[must_use]
    pub const fn new() -> Self {
        Self([ScheduledAction::NoChange; HOURS_PER_DAY])
    }

    /// Returns the action for the given hour.
    #[must_use]
    pub const fn get(&self, hour: Hour) -> ScheduledAction {
        self.0[hour.index()]
    }

    /// Replaces the action for the given hour.
    ///
    /// Returns the previous action.
    pub fn set(&mut self, hour: Hour, action: ScheduledAction) -> ScheduledAction {
        std::mem::replace(&mut self.0[hour.index()], action)
    }

    /// Resets every slot to [`ScheduledAction::NoChange`].
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns all 24 slots in hour order.
    #[must_use]
    pub fn as_slice(&self) -> &[ScheduledAction] {
        &self.0
    }

    /// Iterates over `(hour, action)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (Hour, ScheduledAction)> + '_ {
        Hour::all().zip(self.0.iter().copied())
    }

    /// Iterates over the hours that carry an action.
    pub fn scheduled_hours(&self) -> impl Iterator<Item = (Hour, ScheduledAction)> + '_ {
        self.iter().filter(|(_, action)| !action.is_no_change())
    }

    /// Returns `true` when no hour carries an action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(ScheduledAction::is_no_change)
    }

    /// Renders the schedule column: 24 tokens, each followed by `;`.
    #[must_use]
    pub fn to_csv_text(&self) -> String {
        let mut out = String::with_capacity(HOURS_PER_DAY * 6);
        for action in &self.0 {
            out.push_str(action.as_csv_token());
            out.push(SLOT_TERMINATOR);
        }
        out
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Schedule {
    type Err = ParseError;

    /// Parses the schedule column.
    ///
    /// A single trailing `;` is accepted; any other slot count is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_suffix(SLOT_TERMINATOR).unwrap_or(s);
        let tokens: Vec<&str> = body.split(SLOT_TERMINATOR).collect();
        if tokens.len() != HOURS_PER_DAY {
            return Err(ParseError::ScheduleLength(tokens.len()));
        }

        let mut schedule = Self::new();
        for (slot, token) in schedule.0.iter_mut().zip(tokens) {
            *slot = token
                .trim()
                .parse()
                .map_err(|source| ParseError::InvalidValue {
                    field: "schedule",
                    source,
                })?;
        }
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(h: i64) -> Hour {
        Hour::new(h).unwrap()
    }

    #[test]
    fn new_schedule_is_empty() {
        let schedule = Schedule::new();
        assert!(schedule.is_empty());
        assert_eq!(schedule.as_slice().len(), 24);
        assert_eq!(schedule.scheduled_hours().count(), 0);
    }

    #[test]
    fn set_returns_previous_action() {
        let mut schedule = Schedule::new();
        assert_eq!(
            schedule.set(hour(3), ScheduledAction::TurnOff),
            ScheduledAction::NoChange
        );
        assert_eq!(
            schedule.set(hour(3), ScheduledAction::NoChange),
            ScheduledAction::TurnOff
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn csv_text_has_24_terminated_tokens() {
        let mut schedule = Schedule::new();
        schedule.set(hour(0), ScheduledAction::TurnOn);
        schedule.set(hour(23), ScheduledAction::TurnOff);

        let text = schedule.to_csv_text();
        assert_eq!(text.matches(';').count(), 24);
        assert!(text.starts_with("True;None;"));
        assert!(text.ends_with("None;False;"));
    }

    #[test]
    fn parse_accepts_export_output() {
        let mut schedule = Schedule::new();
        schedule.set(hour(5), ScheduledAction::TurnOn);
        schedule.set(hour(6), ScheduledAction::TurnOff);

        let parsed: Schedule = schedule.to_csv_text().parse().unwrap();
        assert_eq!(parsed, schedule);
    }

    #[test]
    fn parse_accepts_missing_trailing_separator() {
        let text = vec!["None"; 24].join(";");
        assert_eq!(text.parse::<Schedule>().unwrap(), Schedule::new());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let short = "None;".repeat(23);
        assert_eq!(
            short.parse::<Schedule>(),
            Err(ParseError::ScheduleLength(23))
        );

        let long = "None;".repeat(25);
        assert_eq!(long.parse::<Schedule>(), Err(ParseError::ScheduleLength(25)));
    }

    #[test]
    fn parse_rejects_unknown_token() {
        let text = format!("Maybe;{}", "None;".repeat(23));
        assert!(matches!(
            text.parse::<Schedule>(),
            Err(ParseError::InvalidValue {
                field: "schedule",
                ..
            })
        ));
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut schedule = Schedule::new();
        schedule.set(hour(0), ScheduledAction::TurnOn);
        schedule.set(hour(23), ScheduledAction::TurnOff);
        assert!(!schedule.is_empty());

        schedule.clear();
        assert!(schedule.is_empty());
        assert_eq!(schedule, Schedule::default());
    }

    #[test]
    fn iter_yields_hours_in_order() {
        let schedule = Schedule::new();
        let hours: Vec<u8> = schedule.iter().map(|(h, _)| h.value()).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u8>>());
    }
}
