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

use std::env::current_dir;
use std::path::PathBuf;

use crate::badges::store::BadgeStore;
use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::storage::Storage;
use crate::timetable::geometry::GridGeometry;
use crate::timetable::seed::default_start_date;
use crate::timetable::store::TimetableStore;

pub const DATABASE_FILE_NAME: &str = "nurseplan.db";

/// A directory holding a student's timetable and badges.
pub struct Workspace {
    pub directory: PathBuf,
    pub config: Config,
    pub geometry: GridGeometry,
    pub timetable: TimetableStore,
    pub badges: BadgeStore,
}

impl Workspace {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;
        let geometry = GridGeometry::new(&config.grid);

        let db_path: PathBuf = directory.join(DATABASE_FILE_NAME);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        log::debug!("Opening storage at {db_path}");

        let seed_start = config
            .semester
            .start_date
            .unwrap_or_else(default_start_date);
        let mut timetable = TimetableStore::open(Storage::new(db_path)?, seed_start);
        timetable.set_current_week(config.semester.current_week);
        let badges = BadgeStore::open(Storage::new(db_path)?);

        Ok(Self {
            directory,
            config,
            geometry,
            timetable,
            badges,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    #[test]
    fn test_non_existent_directory() {
        let result = Workspace::open(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_open_creates_database() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let workspace = Workspace::open(Some(directory))?;
        assert!(dir.path().join(DATABASE_FILE_NAME).exists());
        assert_eq!(workspace.directory, dir.path().canonicalize()?);
        assert_eq!(workspace.timetable.timetable().len(), 1);
        assert!(workspace.badges.badges().count() > 0);
        Ok(())
    }

    #[test]
    fn test_config_drives_seed_and_week() -> Fallible<()> {
        let dir = tempdir()?;
        write(
            dir.path().join(CONFIG_FILE_NAME),
            "[semester]\nstart_date = \"2025-09-01\"\ncurrent_week = 3\n",
        )?;
        let workspace = Workspace::open(Some(dir.path().display().to_string()))?;
        let week = workspace.timetable.week(1).unwrap();
        assert_eq!(week.start_date.to_string(), "2025-09-01");
        assert_eq!(workspace.timetable.current_week(), 3);
        Ok(())
    }
}
