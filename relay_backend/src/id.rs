//! Defines the backend object ID types

use chrono::{DateTime, Utc};
use relay_macros::object_ids;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A backend identifier. The top 42 bits hold a millisecond timestamp relative to
/// [`Snowflake::EPOCH`]; the remainder identify the worker, process and sequence
/// that minted it.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snowflake(u64);

impl Snowflake {
    /// 2015-01-01T00:00:00Z, as milliseconds since the unix epoch
    pub const EPOCH: u64 = 1_420_070_400_000;

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Build a snowflake from a unix timestamp in milliseconds and the low
    /// 22 bits of worker, process and sequence data
    pub fn from_parts(unix_millis: u64, worker: u8, process: u8, increment: u16) -> Self {
        let timestamp = unix_millis.saturating_sub(Self::EPOCH) & 0x3ff_ffff_ffff;
        Self(
            timestamp << 22
                | (worker as u64 & 0x1f) << 17
                | (process as u64 & 0x1f) << 12
                | (increment as u64 & 0xfff),
        )
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Milliseconds since the unix epoch at which this ID was minted
    pub fn unix_millis(&self) -> u64 {
        (self.0 >> 22) + Self::EPOCH
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        i64::try_from(self.unix_millis())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_default()
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseSnowflakeError {
    #[error("invalid snowflake {0:?}")]
    Invalid(String),
    #[error("snowflake must be non-zero")]
    Zero,
}

impl FromStr for Snowflake {
    type Err = ParseSnowflakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u64>() {
            Ok(0) => Err(ParseSnowflakeError::Zero),
            Ok(raw) => Ok(Self(raw)),
            Err(_) => Err(ParseSnowflakeError::Invalid(s.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Mismatched object ID type")]
pub struct WrongIdTypeError;

object_ids!(ObjectId {
    Guild: snowflake;
    Channel: snowflake;
    User: snowflake;
    Message: snowflake;
});
