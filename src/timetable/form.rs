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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use rand::Rng;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::timetable::model::ClassSchedule;
use crate::types::clock_time::ClockTime;
use crate::types::day::Day;
use crate::types::schedule_id::ScheduleId;
use crate::types::timestamp::Timestamp;

/// Number of colors a class can be drawn in.
pub const PALETTE_SIZE: usize = 8;

/// The fields of the "add class" form, as entered.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScheduleForm {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub name: String,
    pub professor: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormError {
    MissingField(&'static str),
    InvalidDay(String),
    InvalidTime { field: &'static str, value: String },
    EndNotAfterStart { start: ClockTime, end: ClockTime },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingField(field) => write!(f, "Please fill in the {field}."),
            FormError::InvalidDay(value) => {
                write!(f, "Invalid day '{value}': expected 0 (Mon) to 4 (Fri).")
            }
            FormError::InvalidTime { field, value } => {
                write!(f, "Invalid {field} '{value}': expected HH:MM.")
            }
            FormError::EndNotAfterStart { start, end } => {
                write!(f, "End time {end} must be after start time {start}.")
            }
        }
    }
}

impl Error for FormError {}

impl From<FormError> for ErrorReport {
    fn from(value: FormError) -> Self {
        ErrorReport::new(&value.to_string())
    }
}

impl ScheduleForm {
    /// Check the form and build the class it describes, with a fresh id and
    /// a random color.
    pub fn into_schedule(self, now: Timestamp) -> Result<ClassSchedule, FormError> {
        let fields = [
            ("day", &self.day),
            ("start time", &self.start_time),
            ("end time", &self.end_time),
            ("class name", &self.name),
            ("professor", &self.professor),
            ("location", &self.location),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(label));
            }
        }
        let day = self
            .day
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|index| Day::try_from(index).ok())
            .ok_or_else(|| FormError::InvalidDay(self.day.trim().to_string()))?;
        let start_time = parse_time("start time", &self.start_time)?;
        let end_time = parse_time("end time", &self.end_time)?;
        if end_time <= start_time {
            return Err(FormError::EndNotAfterStart {
                start: start_time,
                end: end_time,
            });
        }
        Ok(ClassSchedule {
            id: ScheduleId::generate(now),
            day,
            start_time,
            end_time,
            name: self.name.trim().to_string(),
            professor: self.professor.trim().to_string(),
            location: self.location.trim().to_string(),
            color_index: random_color_index(),
        })
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<ClockTime, FormError> {
    ClockTime::parse(value).map_err(|_| FormError::InvalidTime {
        field,
        value: value.trim().to_string(),
    })
}

pub fn random_color_index() -> usize {
    rand::thread_rng().gen_range(0..PALETTE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ScheduleForm {
        ScheduleForm {
            day: "0".to_string(),
            start_time: "13:00".to_string(),
            end_time: "14:00".to_string(),
            name: " Test ".to_string(),
            professor: "Prof. Han".to_string(),
            location: "Nursing Hall 301".to_string(),
        }
    }

    #[test]
    fn test_valid_form() -> Result<(), FormError> {
        let schedule = form().into_schedule(Timestamp::now())?;
        assert_eq!(schedule.day, Day::Monday);
        assert_eq!(schedule.start_time.to_string(), "13:00");
        assert_eq!(schedule.end_time.to_string(), "14:00");
        assert_eq!(schedule.name, "Test");
        assert!(schedule.id.as_str().starts_with("schedule_"));
        assert!(schedule.color_index < PALETTE_SIZE);
        Ok(())
    }

    #[test]
    fn test_blank_fields() {
        let mut f = form();
        f.professor = "   ".to_string();
        assert_eq!(
            f.into_schedule(Timestamp::now()).unwrap_err(),
            FormError::MissingField("professor")
        );
        let mut f = form();
        f.name = String::new();
        assert_eq!(
            f.into_schedule(Timestamp::now()).unwrap_err(),
            FormError::MissingField("class name")
        );
    }

    #[test]
    fn test_invalid_day() {
        let mut f = form();
        f.day = "5".to_string();
        assert_eq!(
            f.into_schedule(Timestamp::now()).unwrap_err(),
            FormError::InvalidDay("5".to_string())
        );
    }

    #[test]
    fn test_invalid_time() {
        let mut f = form();
        f.start_time = "1pm".to_string();
        assert!(matches!(
            f.into_schedule(Timestamp::now()),
            Err(FormError::InvalidTime {
                field: "start time",
                ..
            })
        ));
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut f = form();
        f.end_time = "13:00".to_string();
        let err = f.into_schedule(Timestamp::now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "End time 13:00 must be after start time 13:00."
        );
        let mut f = form();
        f.end_time = "12:00".to_string();
        assert!(f.into_schedule(Timestamp::now()).is_err());
    }

    #[test]
    fn test_color_index_in_range() {
        for _ in 0..100 {
            assert!(random_color_index() < PALETTE_SIZE);
        }
    }
}
