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

use serde::Serialize;

use crate::badges::model::NursingBadge;
use crate::badges::store::BadgeProgress;
use crate::error::Fallible;
use crate::timetable::model::Timetable;
use crate::workspace::Workspace;

pub fn export_workspace(directory: Option<String>) -> Fallible<()> {
    let ws: Workspace = Workspace::open(directory)?;
    let json: String = export_json(&ws)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    current_week: u32,
    saved_at: Option<String>,
    timetable: &'a Timetable,
    badges: Vec<&'a NursingBadge>,
    badge_progress: BadgeProgress,
}

fn export_json(ws: &Workspace) -> Fallible<String> {
    let export = Export {
        current_week: ws.timetable.current_week(),
        saved_at: ws.timetable.last_saved().map(|ts| ts.to_rfc3339()),
        timetable: ws.timetable.timetable(),
        badges: ws.badges.badges().collect(),
        badge_progress: ws.badges.progress(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
