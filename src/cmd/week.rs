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

use std::fmt::Write;

use crate::error::Fallible;
use crate::timetable::model::WeekData;
use crate::types::day::Day;
use crate::workspace::Workspace;

/// Print one week of the timetable. Defaults to the configured current week.
pub fn print_week(directory: Option<String>, week: Option<u32>) -> Fallible<()> {
    let mut ws = Workspace::open(directory)?;
    if let Some(week) = week {
        ws.timetable.set_current_week(week);
    }
    let timetable = ws.timetable.timetable();
    if timetable.is_empty() {
        println!("No weeks yet. Run `nurseplan init` to create the semester.");
        return Ok(());
    }
    match ws.timetable.current_week_data() {
        Some(data) => print!("{}", format_week(data)),
        None => {
            let known: Vec<String> = timetable.weeks().map(|w| w.week.to_string()).collect();
            println!(
                "Week {} has no timetable. Known weeks: {}.",
                ws.timetable.current_week(),
                known.join(", ")
            );
        }
    }
    Ok(())
}

pub fn format_week(data: &WeekData) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Week {} ({} to {})",
        data.week, data.start_date, data.end_date
    );
    for day in Day::ALL {
        let classes = data.schedules_on(day);
        if classes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{day}");
        for class in classes {
            let _ = writeln!(
                out,
                "  {}-{}  {} ({}, {})  [{}]",
                class.start_time,
                class.end_time,
                class.name,
                class.professor,
                class.location,
                class.id
            );
        }
    }
    out
}
