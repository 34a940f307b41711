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

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(String);

impl BadgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BadgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStatus {
    /// Below the required score.
    Pending,
    /// At or above the required score, below the passing score.
    Active,
    /// At or above the passing score.
    Completed,
}

impl BadgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeStatus::Pending => "pending",
            BadgeStatus::Active => "active",
            BadgeStatus::Completed => "completed",
        }
    }
}

impl Display for BadgeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub score: u32,
    pub date: NaiveDate,
}

/// A clinical skill badge and the student's progress on it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NursingBadge {
    pub id: BadgeId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub required_score: u32,
    pub passing_score: u32,
    pub max_score: u32,
    pub current_score: u32,
    pub attempts: u32,
    pub score_history: Vec<ScoreEntry>,
    pub status: BadgeStatus,
    pub completed_date: Option<NaiveDate>,
}

/// The status a badge has at `score`.
pub fn status_for_score(score: u32, required_score: u32, passing_score: u32) -> BadgeStatus {
    if score >= passing_score {
        BadgeStatus::Completed
    } else if score >= required_score {
        BadgeStatus::Active
    } else {
        BadgeStatus::Pending
    }
}

impl NursingBadge {
    /// The badge after recording an attempt scoring `score` on `today`.
    ///
    /// The status follows the latest score only, so a completed badge goes
    /// back to active or pending after a lower score. The completion date is
    /// kept only while the badge is completed.
    pub fn with_score(&self, score: u32, today: NaiveDate) -> NursingBadge {
        let mut badge = self.clone();
        badge.current_score = score;
        badge.attempts += 1;
        badge.score_history.push(ScoreEntry { score, date: today });
        badge.status = status_for_score(score, self.required_score, self.passing_score);
        badge.completed_date = match badge.status {
            BadgeStatus::Completed => Some(today),
            BadgeStatus::Pending | BadgeStatus::Active => None,
        };
        badge
    }

    /// Progress towards the passing score, from 0 to 100.
    pub fn progress_percent(&self) -> f64 {
        if self.passing_score == 0 {
            return 100.0;
        }
        let ratio = f64::from(self.current_score) / f64::from(self.passing_score);
        (ratio * 100.0).min(100.0)
    }

    pub fn best_score(&self) -> Option<u32> {
        self.score_history.iter().map(|entry| entry.score).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge() -> NursingBadge {
        NursingBadge {
            id: BadgeId::new("vital-signs"),
            title: "Vital Signs".to_string(),
            category: "Assessment".to_string(),
            description: "Measure temperature, pulse, respiration and blood pressure.".to_string(),
            required_score: 60,
            passing_score: 80,
            max_score: 100,
            current_score: 0,
            attempts: 0,
            score_history: Vec::new(),
            status: BadgeStatus::Pending,
            completed_date: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(status_for_score(0, 60, 80), BadgeStatus::Pending);
        assert_eq!(status_for_score(59, 60, 80), BadgeStatus::Pending);
        assert_eq!(status_for_score(60, 60, 80), BadgeStatus::Active);
        assert_eq!(status_for_score(79, 60, 80), BadgeStatus::Active);
        assert_eq!(status_for_score(80, 60, 80), BadgeStatus::Completed);
        assert_eq!(status_for_score(100, 60, 80), BadgeStatus::Completed);
    }

    #[test]
    fn test_with_score_records_attempt() {
        let original = badge();
        let updated = original.with_score(65, today());
        assert_eq!(updated.current_score, 65);
        assert_eq!(updated.attempts, 1);
        assert_eq!(
            updated.score_history,
            vec![ScoreEntry {
                score: 65,
                date: today()
            }]
        );
        assert_eq!(updated.status, BadgeStatus::Active);
        assert_eq!(updated.completed_date, None);
        // The original is untouched.
        assert_eq!(original, badge());
    }

    #[test]
    fn test_completion_date() {
        let updated = badge().with_score(80, today());
        assert_eq!(updated.status, BadgeStatus::Completed);
        assert_eq!(updated.completed_date, Some(today()));
    }

    #[test]
    fn test_completed_badge_can_regress() {
        let completed = badge().with_score(90, today());
        let later = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        let regressed = completed.with_score(50, later);
        assert_eq!(regressed.status, BadgeStatus::Pending);
        assert_eq!(regressed.completed_date, None);
        assert_eq!(regressed.attempts, 2);
        assert_eq!(regressed.best_score(), Some(90));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(badge().progress_percent(), 0.0);
        assert_eq!(badge().with_score(40, today()).progress_percent(), 50.0);
        assert_eq!(badge().with_score(95, today()).progress_percent(), 100.0);
    }

    #[test]
    fn test_serde_layout() -> crate::error::Fallible<()> {
        let value = serde_json::to_value(badge().with_score(80, today()))?;
        assert_eq!(value["status"], "completed");
        assert_eq!(value["requiredScore"], 60);
        assert_eq!(value["completedDate"], "2025-04-01");
        assert_eq!(value["scoreHistory"][0]["score"], 80);
        Ok(())
    }
}
