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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// A teaching day. Serialized as its index, Monday being zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn index(self) -> u8 {
        match self {
            Day::Monday => 0,
            Day::Tuesday => 1,
            Day::Wednesday => 2,
            Day::Thursday => 3,
            Day::Friday => 4,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
        }
    }
}

impl TryFrom<u8> for Day {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Day::Monday),
            1 => Ok(Day::Tuesday),
            2 => Ok(Day::Wednesday),
            3 => Ok(Day::Thursday),
            4 => Ok(Day::Friday),
            _ => fail(format!("invalid day index: {value}")),
        }
    }
}

impl From<Day> for u8 {
    fn from(value: Day) -> Self {
        value.index()
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_index_round_trip() -> Fallible<()> {
        for day in Day::ALL {
            assert_eq!(Day::try_from(day.index())?, day);
        }
        assert!(Day::try_from(5).is_err());
        Ok(())
    }

    #[test]
    fn test_serde_as_number() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&Day::Wednesday)?, "2");
        let day: Day = serde_json::from_str("4")?;
        assert_eq!(day, Day::Friday);
        assert!(serde_json::from_str::<Day>("7").is_err());
        Ok(())
    }
}
