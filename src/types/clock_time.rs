// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// A wall-clock time of day with minute resolution, written as `HH:MM`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Construct a time in a constant context. Panics on out-of-range input.
    pub const fn hm(hours: u16, minutes: u16) -> Self {
        assert!(hours <= 23 && minutes <= 59);
        Self(hours * 60 + minutes)
    }

    pub fn new(hours: u16, minutes: u16) -> Fallible<Self> {
        if hours > 23 || minutes > 59 {
            return fail(format!("time out of range: {hours:02}:{minutes:02}"));
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Parse a time written as `H:MM` or `HH:MM`.
    pub fn parse(value: &str) -> Fallible<Self> {
        let value = value.trim();
        let Some((hours, minutes)) = value.split_once(':') else {
            return fail(format!("invalid time: '{value}'"));
        };
        let valid_hours = (1..=2).contains(&hours.len()) && hours.bytes().all(|b| b.is_ascii_digit());
        let valid_minutes = minutes.len() == 2 && minutes.bytes().all(|b| b.is_ascii_digit());
        if !valid_hours || !valid_minutes {
            return fail(format!("invalid time: '{value}'"));
        }
        let hours: u16 = hours
            .parse()
            .map_err(|_| ErrorReport::new(&format!("invalid time: '{value}'")))?;
        let minutes: u16 = minutes
            .parse()
            .map_err(|_| ErrorReport::new(&format!("invalid time: '{value}'")))?;
        Self::new(hours, minutes)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
