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

use chrono::Days;
use chrono::NaiveDate;

use crate::config::MAX_WEEKS;
use crate::error::Fallible;
use crate::error::fail;
use crate::storage::Storage;
use crate::timetable::model::ClassSchedule;
use crate::timetable::model::Timetable;
use crate::timetable::model::WeekData;
use crate::timetable::reducer::Action;
use crate::timetable::reducer::reduce;
use crate::timetable::seed::seed_timetable;
use crate::types::schedule_id::ScheduleId;
use crate::types::timestamp::Timestamp;

/// Storage key of the timetable blob.
pub const TIMETABLE_KEY: &str = "timetable_data";

/// The in-memory timetable and the week being viewed.
///
/// Every change goes through [`reduce`]; after an effective change the whole
/// timetable is written back to storage. Storage failures are logged and
/// otherwise ignored, so the in-memory state is always usable.
pub struct TimetableStore {
    storage: Storage,
    timetable: Timetable,
    current_week: u32,
    is_loading: bool,
    seed_start: NaiveDate,
}

impl TimetableStore {
    /// Open the store and load the timetable from `storage`. When nothing is
    /// stored yet, a single week starting on `seed_start` is written.
    pub fn open(storage: Storage, seed_start: NaiveDate) -> Self {
        let mut store = Self {
            storage,
            timetable: Timetable::default(),
            current_week: 1,
            is_loading: false,
            seed_start,
        };
        store.load_week_data();
        store
    }

    pub fn load_week_data(&mut self) {
        self.is_loading = true;
        let mut seeded = false;
        self.timetable = match self.storage.get_json::<Timetable>(TIMETABLE_KEY) {
            Ok(Some(timetable)) => {
                log::debug!("Loaded {} weeks.", timetable.len());
                timetable
            }
            Ok(None) => {
                log::debug!("No timetable stored, seeding week 1.");
                seeded = true;
                seed_timetable(self.seed_start)
            }
            Err(e) => {
                log::error!("Failed to load timetable: {e}");
                Timetable::default()
            }
        };
        self.is_loading = false;
        if seeded {
            self.persist();
        }
    }

    /// Apply an action, persisting if it changed anything.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let changed = reduce(&mut self.timetable, action);
        if changed && !self.is_loading() {
            self.persist();
        }
        changed
    }

    pub fn add_schedule(&mut self, week: u32, schedule: ClassSchedule) -> bool {
        log::debug!("Adding {} to week {week}.", schedule.id);
        self.dispatch(Action::AddSchedule { week, schedule })
    }

    pub fn delete_schedule(&mut self, week: u32, schedule_id: &ScheduleId) -> bool {
        log::debug!("Deleting {schedule_id} from week {week}.");
        self.dispatch(Action::DeleteSchedule {
            week,
            schedule_id: schedule_id.clone(),
        })
    }

    /// Create any of weeks `1..=count` that do not exist yet. Week `n`
    /// starts `7 * (n - 1)` days after `start_date`. Returns how many weeks
    /// were created. The new weeks are written in a single save.
    pub fn ensure_semester(&mut self, start_date: NaiveDate, count: u32) -> Fallible<usize> {
        if count > MAX_WEEKS {
            return fail(format!("a semester has at most {MAX_WEEKS} weeks."));
        }
        let mut next = self.timetable.clone();
        let mut created = 0;
        for week in 1..=count {
            if next.contains(week) {
                continue;
            }
            let offset = Days::new(7 * u64::from(week - 1));
            let Some(week_start) = start_date.checked_add_days(offset) else {
                log::warn!("Week {week} falls outside the supported date range.");
                break;
            };
            if reduce(&mut next, Action::InsertWeek(WeekData::new(week, week_start))) {
                created += 1;
            }
        }
        if created > 0 {
            self.dispatch(Action::ReplaceAll(next));
        }
        Ok(created)
    }

    /// Set the viewed week. Any number is accepted.
    pub fn set_current_week(&mut self, week: u32) {
        self.current_week = week;
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn current_week_data(&self) -> Option<&WeekData> {
        self.timetable.get(self.current_week)
    }

    pub fn week(&self, week: u32) -> Option<&WeekData> {
        self.timetable.get(week)
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// When the timetable was last written to storage.
    pub fn last_saved(&self) -> Option<Timestamp> {
        match self.storage.updated_at(TIMETABLE_KEY) {
            Ok(ts) => ts,
            Err(e) => {
                log::error!("Failed to read timetable metadata: {e}");
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn persist(&self) {
        if let Err(e) = self.storage.set_json(TIMETABLE_KEY, &self.timetable) {
            log::error!("Failed to save timetable: {e}");
        }
    }

    #[cfg(test)]
    pub fn into_storage(self) -> Storage {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::timetable::form::ScheduleForm;
    use crate::timetable::seed::default_start_date;

    fn memory_store() -> Fallible<TimetableStore> {
        Ok(TimetableStore::open(
            Storage::new(":memory:")?,
            default_start_date(),
        ))
    }

    fn test_schedule() -> Fallible<ClassSchedule> {
        let form = ScheduleForm {
            day: "0".to_string(),
            start_time: "13:00".to_string(),
            end_time: "14:00".to_string(),
            name: "Test".to_string(),
            professor: "Prof".to_string(),
            location: "Room".to_string(),
        };
        Ok(form.into_schedule(Timestamp::now())?)
    }

    #[test]
    fn test_seeds_on_first_open() -> Fallible<()> {
        let store = memory_store()?;
        assert!(!store.is_loading());
        assert_eq!(store.timetable().len(), 1);
        assert_eq!(store.current_week(), 1);
        assert!(store.current_week_data().is_some());
        assert!(store.last_saved().is_some());
        let storage = store.into_storage();
        let stored: Option<Timetable> = storage.get_json(TIMETABLE_KEY)?;
        assert_eq!(stored.map(|t| t.len()), Some(1));
        Ok(())
    }

    #[test]
    fn test_add_then_delete() -> Fallible<()> {
        let mut store = memory_store()?;
        let before = store.week(1).unwrap().clone();
        let schedule = test_schedule()?;
        let id = schedule.id.clone();
        assert!(store.add_schedule(1, schedule));
        assert_eq!(
            store.week(1).unwrap().schedules.len(),
            before.schedules.len() + 1
        );
        assert!(store.delete_schedule(1, &id));
        assert_eq!(store.week(1).unwrap(), &before);
        Ok(())
    }

    #[test]
    fn test_mutations_are_persisted() -> Fallible<()> {
        let mut store = memory_store()?;
        let schedule = test_schedule()?;
        store.add_schedule(1, schedule.clone());
        let storage = store.into_storage();
        let reopened = TimetableStore::open(storage, default_start_date());
        assert!(reopened.week(1).unwrap().schedules.contains(&schedule));
        Ok(())
    }

    #[test]
    fn test_missing_week_is_noop() -> Fallible<()> {
        let mut store = memory_store()?;
        let before = store.timetable().clone();
        assert!(!store.add_schedule(12, test_schedule()?));
        assert!(!store.delete_schedule(12, &ScheduleId::new("seed_1")));
        assert_eq!(store.timetable(), &before);
        Ok(())
    }

    #[test]
    fn test_current_week_unbounded() -> Fallible<()> {
        let mut store = memory_store()?;
        store.set_current_week(40);
        assert_eq!(store.current_week(), 40);
        assert!(store.current_week_data().is_none());
        store.set_current_week(0);
        assert!(store.current_week_data().is_none());
        Ok(())
    }

    #[test]
    fn test_corrupt_blob_loads_empty() -> Fallible<()> {
        let storage = Storage::new(":memory:")?;
        storage.set_item(TIMETABLE_KEY, "{not json")?;
        let store = TimetableStore::open(storage, default_start_date());
        assert!(store.timetable().is_empty());
        assert!(!store.is_loading());
        let storage = store.into_storage();
        assert_eq!(
            storage.get_item(TIMETABLE_KEY)?,
            Some("{not json".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_ensure_semester() -> Fallible<()> {
        let mut store = memory_store()?;
        let seeded_week = store.week(1).unwrap().clone();
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(store.ensure_semester(start, 16)?, 15);
        assert_eq!(store.timetable().len(), 16);
        assert_eq!(store.week(1).unwrap(), &seeded_week);
        let week_16 = store.week(16).unwrap();
        assert_eq!(week_16.start_date, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        assert_eq!(week_16.end_date, NaiveDate::from_ymd_opt(2025, 12, 19).unwrap());
        assert_eq!(store.ensure_semester(start, 16)?, 0);
        Ok(())
    }

    #[test]
    fn test_ensure_full_semester_is_saved() -> Fallible<()> {
        let mut store = memory_store()?;
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(store.ensure_semester(start, MAX_WEEKS)?, 52);
        let reopened = TimetableStore::open(store.into_storage(), default_start_date());
        assert_eq!(reopened.timetable().len(), 53);
        let last = reopened.week(MAX_WEEKS).unwrap();
        assert_eq!(last.start_date, NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
        Ok(())
    }

    #[test]
    fn test_ensure_semester_rejects_long_semester() -> Fallible<()> {
        let mut store = memory_store()?;
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let result = store.ensure_semester(start, 2000);
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: a semester has at most 53 weeks.".to_string())
        );
        assert_eq!(store.timetable().len(), 1);
        Ok(())
    }

    #[test]
    fn test_write_failure_keeps_memory() -> Fallible<()> {
        let mut store = memory_store()?;
        let stored = store.storage.get_item(TIMETABLE_KEY)?;
        let saved_at = store.last_saved();
        store.storage.set_read_only()?;
        let schedule = test_schedule()?;
        assert!(store.add_schedule(1, schedule.clone()));
        assert!(store.timetable().get(1).unwrap().schedules.contains(&schedule));
        assert_eq!(store.storage.get_item(TIMETABLE_KEY)?, stored);
        assert_eq!(store.last_saved(), saved_at);
        Ok(())
    }

    #[test]
    fn test_reopen_from_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nurseplan.db");
        let path = path.to_str().unwrap();
        let id = {
            let mut store = TimetableStore::open(Storage::new(path)?, default_start_date());
            let schedule = test_schedule()?;
            let id = schedule.id.clone();
            store.add_schedule(1, schedule);
            id
        };
        let mut store = TimetableStore::open(Storage::new(path)?, default_start_date());
        assert!(store.week(1).unwrap().schedules.iter().any(|s| s.id == id));
        assert!(store.delete_schedule(1, &id));
        Ok(())
    }
}
