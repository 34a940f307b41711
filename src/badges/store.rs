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

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::badges::catalog::default_badges;
use crate::badges::model::BadgeId;
use crate::badges::model::BadgeStatus;
use crate::badges::model::NursingBadge;
use crate::error::Fallible;
use crate::error::fail;
use crate::storage::Storage;

/// Storage key of the badge blob.
pub const BADGES_KEY: &str = "nursing_badges";

/// All badges, keyed by id. Updates replace the stored record.
pub struct BadgeStore {
    storage: Storage,
    badges: BTreeMap<BadgeId, NursingBadge>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub completed: usize,
    /// Share of completed badges, from 0 to 100.
    pub completion_rate: f64,
}

impl BadgeStore {
    /// Load the badges from `storage`, writing the default set when nothing
    /// is stored yet. An unreadable blob falls back to the default set.
    pub fn open(storage: Storage) -> Self {
        let mut seeded = false;
        let badges = match storage.get_json::<Vec<NursingBadge>>(BADGES_KEY) {
            Ok(Some(list)) => list.into_iter().map(|b| (b.id.clone(), b)).collect(),
            Ok(None) => {
                log::debug!("No badges stored, using defaults.");
                seeded = true;
                default_badges()
            }
            Err(e) => {
                log::error!("Failed to load badges: {e}");
                default_badges()
            }
        };
        let store = Self { storage, badges };
        if seeded {
            store.persist();
        }
        store
    }

    pub fn get(&self, id: &BadgeId) -> Option<&NursingBadge> {
        self.badges.get(id)
    }

    pub fn badges(&self) -> impl Iterator<Item = &NursingBadge> {
        self.badges.values()
    }

    /// Record a score for a badge and return the updated badge.
    pub fn update_badge_score(
        &mut self,
        id: &BadgeId,
        score: u32,
        today: NaiveDate,
    ) -> Fallible<NursingBadge> {
        let Some(badge) = self.badges.get(id) else {
            return fail(format!("no badge with id '{id}'."));
        };
        if score > badge.max_score {
            return fail(format!(
                "score {score} is above the maximum of {} for '{id}'.",
                badge.max_score
            ));
        }
        let updated = badge.with_score(score, today);
        log::debug!(
            "Badge {id}: score {score}, status {} after {} attempts.",
            updated.status,
            updated.attempts
        );
        self.badges.insert(id.clone(), updated.clone());
        self.persist();
        Ok(updated)
    }

    pub fn progress(&self) -> BadgeProgress {
        let count = |status: BadgeStatus| self.badges.values().filter(|b| b.status == status).count();
        let total = self.badges.len();
        let completed = count(BadgeStatus::Completed);
        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        BadgeProgress {
            total,
            pending: count(BadgeStatus::Pending),
            active: count(BadgeStatus::Active),
            completed,
            completion_rate,
        }
    }

    fn persist(&self) {
        let list: Vec<&NursingBadge> = self.badges.values().collect();
        if let Err(e) = self.storage.set_json(BADGES_KEY, &list) {
            log::error!("Failed to save badges: {e}");
        }
    }

    #[cfg(test)]
    pub fn into_storage(self) -> Storage {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn store() -> Fallible<BadgeStore> {
        Ok(BadgeStore::open(Storage::new(":memory:")?))
    }

    #[test]
    fn test_defaults_on_first_open() -> Fallible<()> {
        let store = store()?;
        assert_eq!(store.badges().count(), default_badges().len());
        let storage = store.into_storage();
        assert!(storage.get_item(BADGES_KEY)?.is_some());
        Ok(())
    }

    #[test]
    fn test_update_replaces_record() -> Fallible<()> {
        let mut store = store()?;
        let id = BadgeId::new("bls");
        let updated = store.update_badge_score(&id, 95, today())?;
        assert_eq!(updated.status, BadgeStatus::Completed);
        assert_eq!(store.get(&id), Some(&updated));
        Ok(())
    }

    #[test]
    fn test_update_is_persisted() -> Fallible<()> {
        let mut store = store()?;
        let id = BadgeId::new("hand-hygiene");
        store.update_badge_score(&id, 70, today())?;
        let reopened = BadgeStore::open(store.into_storage());
        let badge = reopened.get(&id).unwrap();
        assert_eq!(badge.status, BadgeStatus::Active);
        assert_eq!(badge.attempts, 1);
        Ok(())
    }

    #[test]
    fn test_unknown_badge() -> Fallible<()> {
        let mut store = store()?;
        let result = store.update_badge_score(&BadgeId::new("juggling"), 50, today());
        assert_eq!(
            result.unwrap_err().to_string(),
            "error: no badge with id 'juggling'."
        );
        Ok(())
    }

    #[test]
    fn test_score_above_max() -> Fallible<()> {
        let mut store = store()?;
        let id = BadgeId::new("bls");
        assert!(store.update_badge_score(&id, 101, today()).is_err());
        assert_eq!(store.get(&id).unwrap().attempts, 0);
        Ok(())
    }

    #[test]
    fn test_progress() -> Fallible<()> {
        let mut store = store()?;
        store.update_badge_score(&BadgeId::new("bls"), 90, today())?;
        store.update_badge_score(&BadgeId::new("ng-tube"), 70, today())?;
        store.update_badge_score(&BadgeId::new("iv-therapy"), 10, today())?;
        let progress = store.progress();
        assert_eq!(progress.total, 9);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.active, 1);
        assert_eq!(progress.pending, 7);
        assert!((progress.completion_rate - 100.0 / 9.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_write_failure_keeps_memory() -> Fallible<()> {
        let mut store = store()?;
        let stored = store.storage.get_item(BADGES_KEY)?;
        store.storage.set_read_only()?;
        let id = BadgeId::new("vital-signs");
        let updated = store.update_badge_score(&id, 85, today())?;
        assert_eq!(updated.status, BadgeStatus::Completed);
        assert_eq!(store.get(&id), Some(&updated));
        assert_eq!(store.progress().completed, 1);
        assert_eq!(store.storage.get_item(BADGES_KEY)?, stored);
        Ok(())
    }

    #[test]
    fn test_corrupt_blob_falls_back() -> Fallible<()> {
        let storage = Storage::new(":memory:")?;
        storage.set_item(BADGES_KEY, "42")?;
        let store = BadgeStore::open(storage);
        assert_eq!(store.badges().count(), default_badges().len());
        Ok(())
    }
}
