/*
Copyright 2020 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use std::fmt;

/// Error raised by `Track` construction or field re-assignment (C2).
///
/// Surfaced to the caller as structured data so a loader can report which
/// track and which field failed without parsing a message string.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: &str, value: impl fmt::Display, reason: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field \"{}\" value {} is invalid: {}",
            self.field, self.value, self.reason
        )
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by the bit/ASCII primitives (C1).
///
/// These are only reachable from validated input; hitting one from the
/// payload encoders (C3) indicates a bug upstream, not a user error.
#[derive(Clone, Debug, PartialEq)]
pub enum CodecError {
    /// `ascii_to_ascii6` or de-armoring received a byte outside the
    /// six-bit ASCII / armor alphabets.
    InvalidChar(u8),

    /// `int_to_bits` was asked to encode a magnitude that doesn't fit in
    /// the requested bit width.
    OutOfRange { value: i64, width: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidChar(b) => write!(f, "invalid six-bit ASCII byte: {}", b),
            CodecError::OutOfRange { value, width } => {
                write!(f, "value {} does not fit in {} bits", value, width)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Raised by the kinematics updater (C5) when the geodesic solver fails
/// to converge. The tick still emits the track's previous position.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodesicError(pub String);

impl fmt::Display for GeodesicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geodesic solver did not converge: {}", self.0)
    }
}

impl std::error::Error for GeodesicError {}
