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

use crate::timetable::model::ClassSchedule;
use crate::timetable::model::Timetable;
use crate::timetable::model::WeekData;
use crate::types::schedule_id::ScheduleId;

/// A change to the timetable.
#[derive(Clone, Debug)]
pub enum Action {
    /// Append a class to a week. Ignored if the week does not exist.
    AddSchedule { week: u32, schedule: ClassSchedule },
    /// Remove a class from a week. Ignored if either is missing.
    DeleteSchedule { week: u32, schedule_id: ScheduleId },
    /// Add a week unless it already exists.
    InsertWeek(WeekData),
    /// Replace everything.
    ReplaceAll(Timetable),
}

/// Apply `action` to `timetable`. Returns whether anything changed.
pub fn reduce(timetable: &mut Timetable, action: Action) -> bool {
    match action {
        Action::AddSchedule { week, schedule } => match timetable.get_mut(week) {
            Some(data) => {
                data.schedules.push(schedule);
                true
            }
            None => {
                log::debug!("Ignoring schedule for unknown week {week}.");
                false
            }
        },
        Action::DeleteSchedule { week, schedule_id } => match timetable.get_mut(week) {
            Some(data) => {
                let before = data.schedules.len();
                data.schedules.retain(|s| s.id != schedule_id);
                data.schedules.len() != before
            }
            None => false,
        },
        Action::InsertWeek(data) => timetable.insert_week(data),
        Action::ReplaceAll(replacement) => {
            if *timetable == replacement {
                false
            } else {
                *timetable = replacement;
                true
            }
        }
    }
}
