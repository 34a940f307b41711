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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::badges::BadgeFormat;
use crate::cmd::badges::list_badges;
use crate::cmd::badges::record_score;
use crate::cmd::export::export_workspace;
use crate::cmd::import::import_weeks;
use crate::cmd::init::init_semester;
use crate::cmd::schedule::add_schedule;
use crate::cmd::schedule::delete_schedule;
use crate::cmd::week::print_week;
use crate::error::Fallible;
use crate::timetable::form::ScheduleForm;
use crate::web::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Create the weeks of the semester.
    Init {
        /// Path to the workspace directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// The Monday of week 1, as YYYY-MM-DD.
        #[arg(long)]
        start_date: Option<String>,
        /// Number of weeks.
        #[arg(long)]
        weeks: Option<u32>,
    },
    /// Print the classes of a week.
    Week {
        /// The week number. By default, the configured current week.
        week: Option<u32>,
        /// Path to the workspace directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Add a class to a week.
    Add {
        #[arg(long)]
        directory: Option<String>,
        #[arg(long)]
        week: u32,
        /// Day index: 0 is Monday, 4 is Friday.
        #[arg(long)]
        day: String,
        /// Start time, as HH:MM.
        #[arg(long)]
        start: String,
        /// End time, as HH:MM.
        #[arg(long)]
        end: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        professor: String,
        #[arg(long)]
        location: String,
    },
    /// Delete a class from a week.
    Delete {
        #[arg(long)]
        directory: Option<String>,
        #[arg(long)]
        week: u32,
        /// The class id, as shown by `week`.
        #[arg(long)]
        id: String,
    },
    /// Import weeks from a JSON file.
    Import {
        /// The file to import.
        file: PathBuf,
        #[arg(long)]
        directory: Option<String>,
    },
    /// List skill badges and overall progress.
    Badges {
        #[arg(long)]
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = BadgeFormat::Text)]
        format: BadgeFormat,
    },
    /// Record a practice score for a badge.
    Score {
        /// The badge id, as shown by `badges`.
        badge: String,
        score: u32,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print the timetable and badges as JSON.
    Export {
        #[arg(long)]
        directory: Option<String>,
    },
    /// Serve the timetable and badges in the browser.
    Serve {
        #[arg(long)]
        directory: Option<String>,
        /// Port to listen on. By default, the configured port.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open a browser.
        #[arg(long)]
        no_open: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Init {
            directory,
            start_date,
            weeks,
        } => {
            init_semester(directory, start_date, weeks)?;
        }
        Command::Week { week, directory } => print_week(directory, week)?,
        Command::Add {
            directory,
            week,
            day,
            start,
            end,
            name,
            professor,
            location,
        } => {
            let form = ScheduleForm {
                day,
                start_time: start,
                end_time: end,
                name,
                professor,
                location,
            };
            add_schedule(directory, week, form)?;
        }
        Command::Delete {
            directory,
            week,
            id,
        } => {
            delete_schedule(directory, week, id)?;
        }
        Command::Import { file, directory } => {
            import_weeks(directory, file)?;
        }
        Command::Badges { directory, format } => list_badges(directory, format)?,
        Command::Score {
            badge,
            score,
            directory,
        } => {
            record_score(directory, badge, score)?;
        }
        Command::Export { directory } => export_workspace(directory)?,
        Command::Serve {
            directory,
            port,
            no_open,
        } => start_server(directory, port, !no_open).await?,
    }
    Ok(())
}
