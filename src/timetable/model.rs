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

use std::collections::BTreeMap;

use chrono::Days;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::types::clock_time::ClockTime;
use crate::types::day::Day;
use crate::types::schedule_id::ScheduleId;

/// A class held on one day of one week.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub id: ScheduleId,
    pub day: Day,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub name: String,
    pub professor: String,
    pub location: String,
    /// Index into the display palette.
    pub color_index: usize,
}

impl ClassSchedule {
    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}

/// One academic week and its classes.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekData {
    pub week: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub schedules: Vec<ClassSchedule>,
}

impl WeekData {
    /// An empty week running from `start_date` to the Friday after it.
    pub fn new(week: u32, start_date: NaiveDate) -> Self {
        let end_date = start_date
            .checked_add_days(Days::new(4))
            .unwrap_or(start_date);
        Self {
            week,
            start_date,
            end_date,
            schedules: Vec::new(),
        }
    }

    /// The classes held on `day`, earliest first.
    pub fn schedules_on(&self, day: Day) -> Vec<&ClassSchedule> {
        let mut schedules: Vec<&ClassSchedule> =
            self.schedules.iter().filter(|s| s.day == day).collect();
        schedules.sort_by_key(|s| s.start_time);
        schedules
    }
}

/// Every known week, keyed by week number.
///
/// Stored as a JSON array of weeks. When an array names the same week
/// twice, the later entry wins.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<WeekData>", into = "Vec<WeekData>")]
pub struct Timetable {
    weeks: BTreeMap<u32, WeekData>,
}

impl Timetable {
    pub fn get(&self, week: u32) -> Option<&WeekData> {
        self.weeks.get(&week)
    }

    pub fn get_mut(&mut self, week: u32) -> Option<&mut WeekData> {
        self.weeks.get_mut(&week)
    }

    pub fn contains(&self, week: u32) -> bool {
        self.weeks.contains_key(&week)
    }

    /// Insert a week unless one with the same number exists.
    pub fn insert_week(&mut self, data: WeekData) -> bool {
        if self.weeks.contains_key(&data.week) {
            return false;
        }
        self.weeks.insert(data.week, data);
        true
    }

    /// Insert a week, replacing any week with the same number.
    pub fn replace_week(&mut self, data: WeekData) {
        self.weeks.insert(data.week, data);
    }

    pub fn weeks(&self) -> impl Iterator<Item = &WeekData> {
        self.weeks.values()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl From<Vec<WeekData>> for Timetable {
    fn from(value: Vec<WeekData>) -> Self {
        let weeks = value.into_iter().map(|w| (w.week, w)).collect();
        Self { weeks }
    }
}

impl From<Timetable> for Vec<WeekData> {
    fn from(value: Timetable) -> Self {
        value.weeks.into_values().collect()
    }
}
