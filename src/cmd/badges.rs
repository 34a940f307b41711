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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::badges::model::BadgeId;
use crate::badges::model::NursingBadge;
use crate::badges::store::BadgeProgress;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;
use crate::workspace::Workspace;

#[derive(ValueEnum, Clone)]
pub enum BadgeFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for BadgeFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeFormat::Text => write!(f, "text"),
            BadgeFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeReport<'a> {
    progress: BadgeProgress,
    badges: Vec<&'a NursingBadge>,
}

pub fn list_badges(directory: Option<String>, format: BadgeFormat) -> Fallible<()> {
    let ws = Workspace::open(directory)?;
    let report = BadgeReport {
        progress: ws.badges.progress(),
        badges: ws.badges.badges().collect(),
    };
    match format {
        BadgeFormat::Text => {
            let p = &report.progress;
            println!(
                "{} of {} badges completed ({:.0}%), {} active, {} pending.",
                p.completed, p.total, p.completion_rate, p.active, p.pending
            );
            for badge in report.badges {
                println!(
                    "  {:<28} {:<10} {:>3}/{:<3} {}",
                    badge.id.as_str(),
                    badge.status.as_str(),
                    badge.current_score,
                    badge.passing_score,
                    badge.title
                );
            }
        }
        BadgeFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Record a practice score for a badge.
pub fn record_score(directory: Option<String>, id: String, score: u32) -> Fallible<NursingBadge> {
    let mut ws = Workspace::open(directory)?;
    let id = BadgeId::new(id);
    let previous = ws.badges.get(&id).map(|b| b.status);
    let today = Timestamp::now().local_date();
    let badge = ws.badges.update_badge_score(&id, score, today)?;
    match previous {
        Some(previous) if previous != badge.status => println!(
            "{}: {previous} -> {} (score {}, attempt {}).",
            badge.title, badge.status, badge.current_score, badge.attempts
        ),
        _ => println!(
            "{}: {} (score {}, attempt {}).",
            badge.title, badge.status, badge.current_score, badge.attempts
        ),
    }
    Ok(badge)
}
