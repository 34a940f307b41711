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

use std::fs::read_to_string;
use std::path::PathBuf;

use serde_json::Value;

use crate::coerce::safe_array_from_response;
use crate::error::Fallible;
use crate::error::fail;
use crate::timetable::model::WeekData;
use crate::timetable::reducer::Action;
use crate::workspace::Workspace;

/// Import weeks from a JSON file holding either an array of weeks or an
/// object with a `data` array. Imported weeks replace the weeks with the
/// same number; entries that are not valid weeks are skipped.
pub fn import_weeks(directory: Option<String>, path: PathBuf) -> Fallible<usize> {
    if !path.exists() {
        return fail(format!("file does not exist: {}", path.display()));
    }
    let content = read_to_string(&path)?;
    let value: Value = serde_json::from_str(&content)?;
    let weeks = parse_weeks(value);

    let mut ws = Workspace::open(directory)?;
    let mut merged = ws.timetable.timetable().clone();
    let count = weeks.len();
    for week in weeks {
        merged.replace_week(week);
    }
    ws.timetable.dispatch(Action::ReplaceAll(merged));
    println!("Imported {count} weeks from {}.", path.display());
    Ok(count)
}

fn parse_weeks(value: Value) -> Vec<WeekData> {
    safe_array_from_response(value, "data")
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<WeekData>(item) {
            Ok(week) => Some(week),
            Err(e) => {
                log::warn!("Skipping entry {index}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    fn week_json(week: u32, start: &str, end: &str) -> Value {
        json!({"week": week, "startDate": start, "endDate": end, "schedules": [
            {"id": "schedule_1_a", "day": 2, "startTime": "10:00", "endTime": "11:00",
             "name": "Microbiology", "professor": "Prof. Yoon", "location": "Lab 2", "colorIndex": 6}
        ]})
    }

    #[test]
    fn test_parse_weeks_skips_invalid() {
        let value = json!({"data": [week_json(2, "2025-03-10", "2025-03-14"), {"week": "two"}, 7]});
        let weeks = parse_weeks(value);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week, 2);
        assert!(parse_weeks(json!({"weeks": []})).is_empty());
    }

    #[test]
    fn test_import_merges() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let file = dir.path().join("weeks.json");
        write(
            &file,
            json!([week_json(2, "2025-03-10", "2025-03-14")]).to_string(),
        )?;
        assert_eq!(import_weeks(Some(directory.clone()), file)?, 1);
        let ws = Workspace::open(Some(directory))?;
        assert_eq!(ws.timetable.timetable().len(), 2);
        assert_eq!(ws.timetable.week(2).unwrap().schedules[0].name, "Microbiology");
        Ok(())
    }

    #[test]
    fn test_import_missing_file() -> Fallible<()> {
        let dir = tempdir()?;
        let result = import_weeks(
            Some(dir.path().display().to_string()),
            dir.path().join("nope.json"),
        );
        assert!(result.is_err());
        Ok(())
    }
}
