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

use crate::config::MAX_WEEKS;
use crate::error::Fallible;
use crate::error::fail;
use crate::timetable::seed::default_start_date;
use crate::workspace::Workspace;

/// Create the weeks of the semester that do not exist yet.
pub fn init_semester(
    directory: Option<String>,
    start_date: Option<String>,
    weeks: Option<u32>,
) -> Fallible<usize> {
    if let Some(weeks) = weeks {
        if weeks == 0 || weeks > MAX_WEEKS {
            return fail(format!("--weeks must be between 1 and {MAX_WEEKS}."));
        }
    }
    let mut ws = Workspace::open(directory)?;
    let start_date: NaiveDate = match start_date {
        Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?,
        None => ws
            .config
            .semester
            .start_date
            .unwrap_or_else(default_start_date),
    };
    let weeks = weeks.unwrap_or(ws.config.semester.weeks);
    let created = ws.timetable.ensure_semester(start_date, weeks)?;
    println!("Created {created} weeks starting {start_date}.");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_init_semester() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let created = init_semester(Some(directory.clone()), Some("2025-09-01".to_string()), None)?;
        assert_eq!(created, 15);
        let created = init_semester(Some(directory.clone()), None, Some(18))?;
        assert_eq!(created, 2);
        let ws = Workspace::open(Some(directory))?;
        assert_eq!(ws.timetable.timetable().len(), 18);
        Ok(())
    }

    #[test]
    fn test_weeks_out_of_range() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let result = init_semester(Some(directory.clone()), None, Some(100000));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: --weeks must be between 1 and 53.".to_string())
        );
        assert!(init_semester(Some(directory.clone()), None, Some(0)).is_err());
        let ws = Workspace::open(Some(directory))?;
        assert_eq!(ws.timetable.timetable().len(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_start_date() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        assert!(init_semester(Some(directory), Some("01/09/2025".to_string()), None).is_err());
        Ok(())
    }
}
