use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::TransferError;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3600;

/// elapsed seconds since midnight of the service day.
///
/// GTFS encodes trips that run past midnight with hours of 24 or more (`25:30:00` is
/// 1:30 AM on the following calendar day but still belongs to this service day). the
/// value is never wrapped at 86400, so ordering and differences remain correct across
/// the day boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceTime(u32);

impl ServiceTime {
    pub fn from_seconds(seconds: u32) -> ServiceTime {
        ServiceTime(seconds)
    }

    /// builds a time from hour, minute and second fields. hours are unbounded,
    /// minutes and seconds must be below 60.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<ServiceTime> {
        if minutes >= 60 || seconds >= 60 {
            return None;
        }
        hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes * SECONDS_PER_MINUTE + seconds))
            .map(ServiceTime)
    }

    /// parses a `H:MM:SS` clock string. the hour field may have any number of digits
    /// and may exceed 23. returns None for anything malformed.
    pub fn parse(value: &str) -> Option<ServiceTime> {
        let mut fields = value.trim().split(':');
        let (h, m, s) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return None,
        };
        let digits = |f: &str| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || m.len() != 2 || s.len() != 2 || !digits(m) || !digits(s) {
            return None;
        }
        let hours = h.parse::<u32>().ok()?;
        let minutes = m.parse::<u32>().ok()?;
        let seconds = s.parse::<u32>().ok()?;
        ServiceTime::from_hms(hours, minutes, seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// signed number of seconds from this time until `later`. negative when `later`
    /// happens first.
    pub fn seconds_until(&self, later: &ServiceTime) -> i64 {
        later.0 as i64 - self.0 as i64
    }
}

impl Display for ServiceTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.0 % SECONDS_PER_MINUTE;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for ServiceTime {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceTime::parse(s).ok_or_else(|| TransferError::InvalidServiceTime(s.to_string()))
    }
}

impl TryFrom<String> for ServiceTime {
    type Error = TransferError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ServiceTime::from_str(&value)
    }
}

impl From<ServiceTime> for String {
    fn from(value: ServiceTime) -> Self {
        value.to_string()
    }
}
