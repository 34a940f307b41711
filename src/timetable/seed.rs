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

use chrono::NaiveDate;

use crate::timetable::model::ClassSchedule;
use crate::timetable::model::Timetable;
use crate::timetable::model::WeekData;
use crate::types::clock_time::ClockTime;
use crate::types::day::Day;
use crate::types::schedule_id::ScheduleId;

/// The Monday of week 1 when no semester start is configured.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap_or_default()
}

/// The timetable written on first run: week 1 with a few classes.
pub fn seed_timetable(start_date: NaiveDate) -> Timetable {
    let classes = [
        ("seed_1", Day::Monday, (9, 0), (10, 30), "Fundamentals of Nursing", "Prof. Han", "Nursing Hall 301", 0),
        ("seed_2", Day::Monday, (13, 0), (15, 0), "Human Anatomy", "Prof. Lee", "Science Bldg 105", 1),
        ("seed_3", Day::Tuesday, (10, 0), (12, 0), "Adult Health Nursing", "Prof. Park", "Nursing Hall 204", 2),
        ("seed_4", Day::Wednesday, (9, 0), (11, 0), "Pharmacology", "Prof. Choi", "Nursing Hall 301", 3),
        ("seed_5", Day::Thursday, (14, 0), (16, 0), "Clinical Practicum", "Prof. Jung", "Simulation Lab", 4),
        ("seed_6", Day::Friday, (10, 0), (11, 30), "Health Communication", "Prof. Kang", "Liberal Arts 402", 5),
    ];
    let mut week = WeekData::new(1, start_date);
    for (id, day, start, end, name, professor, location, color_index) in classes {
        week.schedules.push(ClassSchedule {
            id: ScheduleId::new(id),
            day,
            start_time: ClockTime::hm(start.0, start.1),
            end_time: ClockTime::hm(end.0, end.1),
            name: name.to_string(),
            professor: professor.to_string(),
            location: location.to_string(),
            color_index,
        });
    }
    let mut timetable = Timetable::default();
    timetable.insert_week(week);
    timetable
}
