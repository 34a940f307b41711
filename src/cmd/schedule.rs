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

use crate::error::Fallible;
use crate::error::fail;
use crate::timetable::form::ScheduleForm;
use crate::types::schedule_id::ScheduleId;
use crate::types::timestamp::Timestamp;
use crate::workspace::Workspace;

/// Validate the form and add the class to `week`.
pub fn add_schedule(directory: Option<String>, week: u32, form: ScheduleForm) -> Fallible<ScheduleId> {
    let mut ws = Workspace::open(directory)?;
    if ws.timetable.week(week).is_none() {
        return fail(format!(
            "week {week} does not exist. Run `nurseplan init` to create the semester."
        ));
    }
    let schedule = form.into_schedule(Timestamp::now())?;
    let id = schedule.id.clone();
    ws.timetable.add_schedule(week, schedule);
    println!("Added {id} to week {week}.");
    Ok(id)
}

/// Remove a class. Removing a class that does not exist is not an error.
pub fn delete_schedule(directory: Option<String>, week: u32, id: String) -> Fallible<bool> {
    let mut ws = Workspace::open(directory)?;
    let id = ScheduleId::new(id);
    let deleted = ws.timetable.delete_schedule(week, &id);
    if deleted {
        println!("Deleted {id} from week {week}.");
    } else {
        println!("No class {id} in week {week}.");
    }
    Ok(deleted)
}
