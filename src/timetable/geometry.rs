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

//! Placement of classes on the timetable grid.
//!
//! The grid has one column per teaching day and a vertical axis that starts
//! at the base time. Positions are in pixels. Overlapping classes are given
//! overlapping blocks; nothing is done to separate them.

use serde::Serialize;

use crate::config::GridConfig;
use crate::timetable::model::ClassSchedule;
use crate::types::clock_time::ClockTime;
use crate::types::day::Day;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GridGeometry {
    base_time: ClockTime,
    end_time: ClockTime,
    hour_height: f64,
    column_width: f64,
}

/// Where a class is drawn.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct Block {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl GridGeometry {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            base_time: config.base_time,
            end_time: config.end_time,
            hour_height: config.hour_height,
            column_width: config.column_width,
        }
    }

    fn pixels_per_minute(&self) -> f64 {
        self.hour_height / 60.0
    }

    /// Vertical offset of `time`. Negative for times before the base time.
    pub fn top(&self, time: ClockTime) -> f64 {
        let offset = f64::from(time.minutes()) - f64::from(self.base_time.minutes());
        offset * self.pixels_per_minute()
    }

    /// Height of the span from `start` to `end`, never negative.
    pub fn height(&self, start: ClockTime, end: ClockTime) -> f64 {
        let duration = f64::from(end.minutes()) - f64::from(start.minutes());
        (duration * self.pixels_per_minute()).max(0.0)
    }

    pub fn left(&self, day: Day) -> f64 {
        f64::from(day.index()) * self.column_width
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn layout(&self, schedule: &ClassSchedule) -> Block {
        Block {
            top: self.top(schedule.start_time),
            left: self.left(schedule.day),
            width: self.column_width,
            height: self.height(schedule.start_time, schedule.end_time),
        }
    }

    pub fn grid_height(&self) -> f64 {
        self.height(self.base_time, self.end_time)
    }

    pub fn grid_width(&self) -> f64 {
        Day::ALL.len() as f64 * self.column_width
    }

    /// The whole hours between the base and end times, with their offsets.
    pub fn hour_marks(&self) -> Vec<(ClockTime, f64)> {
        let first = self.base_time.minutes().div_ceil(60);
        let last = self.end_time.hour();
        (first..=last)
            .filter_map(|hour| ClockTime::new(hour, 0).ok())
            .map(|time| (time, self.top(time)))
            .collect()
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}
