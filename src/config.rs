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
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::clock_time::ClockTime;

pub const CONFIG_FILE_NAME: &str = "nurseplan.toml";

/// Upper bound on the number of weeks in a semester.
pub const MAX_WEEKS: u32 = 53;

/// Workspace settings, read from `nurseplan.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub semester: SemesterConfig,
    pub grid: GridConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SemesterConfig {
    /// The Monday of week 1.
    pub start_date: Option<NaiveDate>,
    /// Number of academic weeks.
    pub weeks: u32,
    /// The week shown when none is requested.
    pub current_week: u32,
}

impl Default for SemesterConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            weeks: 16,
            current_week: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Time at the top edge of the grid.
    pub base_time: ClockTime,
    /// Time at the bottom edge of the grid.
    pub end_time: ClockTime,
    /// Pixels per hour.
    pub hour_height: f64,
    /// Pixels per day column.
    pub column_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_time: ClockTime::hm(9, 0),
            end_time: ClockTime::hm(18, 0),
            hour_height: 80.0,
            column_width: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

impl Config {
    /// Load the config file from `directory`, or the defaults if there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No config file, using defaults.");
            return Ok(Self::default());
        }
        log::debug!("Loading config from {}", path.display());
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Fallible<()> {
        if self.semester.weeks == 0 {
            return fail("semester.weeks must be at least 1.");
        }
        if self.semester.weeks > MAX_WEEKS {
            return fail(format!("semester.weeks must be at most {MAX_WEEKS}."));
        }
        if self.grid.end_time <= self.grid.base_time {
            return fail("grid.end_time must be after grid.base_time.");
        }
        if !(self.grid.hour_height > 0.0) {
            return fail("grid.hour_height must be positive.");
        }
        if !(self.grid.column_width > 0.0) {
            return fail("grid.column_width must be positive.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() -> Fallible<()> {
        let dir = tempdir()?;
        let config = Config::load(dir.path())?;
        assert_eq!(config, Config::default());
        assert_eq!(config.grid.base_time.minutes(), 540);
        assert_eq!(config.semester.weeks, 16);
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(
            dir.path().join(CONFIG_FILE_NAME),
            "[semester]\nstart_date = \"2025-03-03\"\n\n[grid]\nbase_time = \"08:00\"\n",
        )?;
        let config = Config::load(dir.path())?;
        assert_eq!(
            config.semester.start_date,
            NaiveDate::from_ymd_opt(2025, 3, 3)
        );
        assert_eq!(config.semester.weeks, 16);
        assert_eq!(config.grid.base_time, ClockTime::hm(8, 0));
        assert_eq!(config.grid.hour_height, 80.0);
        assert_eq!(config.server.port, 8000);
        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("[grid]\nbase_time = \"18:00\"\nend_time = \"09:00\"\n").is_err());
        assert!(Config::parse("[grid]\nhour_height = 0.0\n").is_err());
        assert!(Config::parse("[semester]\nweeks = 0\n").is_err());
        assert!(Config::parse("[semester]\nweeks = 53\n").is_ok());
        assert_eq!(
            Config::parse("[semester]\nweeks = 100000\n")
                .err()
                .map(|e| e.to_string()),
            Some("error: semester.weeks must be at most 53.".to_string())
        );
        assert!(Config::parse("[grid]\nbase_time = \"nine\"\n").is_err());
        assert!(Config::parse("unknown = 1\n").is_err());
    }
}
