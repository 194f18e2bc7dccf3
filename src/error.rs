// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the smart home model.
//!
//! Every fallible operation validates its input before touching any state,
//! so an `Err` always means nothing was modified. The hierarchy mirrors the
//! kinds of mistakes a caller can make:
//!
//! - [`ValueError`] - a value is outside its allowed range or is not one of
//!   the accepted literals
//! - [`ParseError`] - a CSV row does not follow the export grammar
//! - [`Error`] - the top-level type returned by [`Home`](crate::Home) and
//!   [`Device`](crate::Device), adding index and variant mismatches

use thiserror::Error;

use crate::device::DeviceType;

/// The main error type for this library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// CSV text could not be imported.
    #[error("format error on line {line}: {source}")]
    Parse {
        /// 1-based line number within the imported text.
        line: usize,
        /// What was wrong with the line.
        #[source]
        source: ParseError,
    },

    /// A device index was outside the collection.
    #[error("device index {index} is out of bounds (home holds {len} devices)")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of devices at the time of the call.
        len: usize,
    },

    /// An operation for one device variant was addressed to the other.
    #[error("device at index {index} is a {actual}, expected a {expected}")]
    WrongDeviceKind {
        /// The index that was addressed.
        index: usize,
        /// The variant the operation needs.
        expected: DeviceType,
        /// The variant actually stored there.
        actual: DeviceType,
    },

    /// A configuration document could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A boolean literal other than `True` or `False` was provided.
    #[error("expected True or False, got {0:?}")]
    InvalidBool(String),

    /// A schedule action token other than `None`, `True` or `False`.
    #[error("invalid scheduled action {0:?}, expected None, True or False")]
    InvalidAction(String),
}

/// Errors raised while reading exported CSV rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The type tag is neither `SmartPlug` nor `SmartDoorbell`.
    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),

    /// The row does not have 3 (basic) or 4 (scheduled) fields.
    #[error("expected 3 or 4 fields, found {0}")]
    FieldCount(usize),

    /// The schedule column does not hold exactly 24 slots.
    #[error("schedule must have 24 slots, found {0}")]
    ScheduleLength(usize),

    /// A field was present but its value was rejected.
    #[error("failed to parse {field}: {source}")]
    InvalidValue {
        /// The column that failed to parse.
        field: &'static str,
        /// The underlying validation failure.
        #[source]
        source: ValueError,
    },

    /// A numeric field is not a decimal integer.
    #[error("{field} is not an integer: {value:?}")]
    NotAnInteger {
        /// The column that failed to parse.
        field: &'static str,
        /// The raw text.
        value: String,
    },
}

impl ParseError {
    /// Attaches a 1-based line number, producing a top-level [`Error`].
    #[must_use]
    pub fn at_line(self, line: usize) -> Error {
        Error::Parse { line, source: self }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
