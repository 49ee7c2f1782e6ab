//! Validated scalar types shared across the document model
//!
//! Each type enforces its domain constraint at construction, so a value
//! that exists is always valid. `FromStr` is the wire-side parse and
//! `Display` its left inverse: text written from a value reads back equal.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// A scalar's text failed its domain constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidValue(String);

impl InvalidValue {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A non-negative integer, as used for track and route numbers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UInt(u32);

impl UInt {
    /// Creates a new `UInt` from a raw count.
    #[must_use = "creates a value that should be used"]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    #[must_use = "returns the wrapped value"]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for UInt {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for UInt {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| InvalidValue::new(format!("not a non-negative integer: {s:?}")))
    }
}

impl fmt::Display for UInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude in decimal degrees, within `[-90.0, +90.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Latitude(f64);

impl Latitude {
    /// Creates a new latitude, rejecting values outside the valid range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValue`] for non-finite or out-of-range degrees.
    pub fn new(degrees: f64) -> Result<Self, InvalidValue> {
        if !degrees.is_finite() || !(-90.0..=90.0).contains(&degrees) {
            return Err(InvalidValue::new(format!(
                "latitude out of range [-90, 90]: {degrees}"
            )));
        }
        // fold -0.0 into +0.0 so equality and hashing agree
        Ok(Self(degrees + 0.0))
    }

    /// Returns the value in decimal degrees.
    #[must_use = "returns the wrapped degrees"]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl Eq for Latitude {}

impl Hash for Latitude {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Latitude {
    type Error = InvalidValue;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl From<Latitude> for f64 {
    fn from(latitude: Latitude) -> Self {
        latitude.0
    }
}

impl FromStr for Latitude {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: f64 = s
            .parse()
            .map_err(|_| InvalidValue::new(format!("not a decimal number: {s:?}")))?;
        Self::new(degrees)
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A longitude in decimal degrees, within `[-180.0, +180.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Longitude(f64);

impl Longitude {
    /// Creates a new longitude, rejecting values outside the valid range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValue`] for non-finite or out-of-range degrees.
    pub fn new(degrees: f64) -> Result<Self, InvalidValue> {
        if !degrees.is_finite() || !(-180.0..=180.0).contains(&degrees) {
            return Err(InvalidValue::new(format!(
                "longitude out of range [-180, 180]: {degrees}"
            )));
        }
        // fold -0.0 into +0.0 so equality and hashing agree
        Ok(Self(degrees + 0.0))
    }

    /// Returns the value in decimal degrees.
    #[must_use = "returns the wrapped degrees"]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl Eq for Longitude {}

impl Hash for Longitude {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Longitude {
    type Error = InvalidValue;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl From<Longitude> for f64 {
    fn from(longitude: Longitude) -> Self {
        longitude.0
    }
}

impl FromStr for Longitude {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: f64 = s
            .parse()
            .map_err(|_| InvalidValue::new(format!("not a decimal number: {s:?}")))?;
        Self::new(degrees)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a finite decimal number, as used for elevations.
pub(crate) fn parse_decimal(text: &str) -> Result<f64, String> {
    let value: f64 = text
        .parse()
        .map_err(|_| format!("not a decimal number: {text:?}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("not a finite number: {text:?}"))
    }
}

/// Parses an RFC 3339 timestamp into UTC.
pub(crate) fn parse_time(text: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

/// Formats a UTC timestamp as RFC 3339, the left inverse of [`parse_time`].
pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Hashes a raw float field so that equal values hash equal.
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    // -0.0 + 0.0 is +0.0, so both zeros land on one bit pattern
    (value + 0.0).to_bits().hash(state);
}
