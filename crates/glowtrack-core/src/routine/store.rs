//! Persistence of the routine record and the day rules applied on save.

use chrono::{Days, NaiveDate};

use super::{Clock, DailyRoutine, RoutineData, RoutinePolicy, RoutineStatus, SystemClock};
use crate::error::Result;
use crate::storage::{KeyValueStore, StorageKeys};

/// Owns the `routineData` record in a key-value store.
///
/// Callers await each mutation before issuing the next one; two saves that
/// overlap are last-writer-wins.
pub struct RoutineStore<S, C = SystemClock> {
    store: S,
    clock: C,
    policy: RoutinePolicy,
}

impl<S: KeyValueStore> RoutineStore<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> RoutineStore<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            policy: RoutinePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RoutinePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RoutinePolicy {
        &self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn kv(&self) -> &S {
        &self.store
    }

    /// Record used when nothing (readable) is stored yet.
    pub fn default_record(&self) -> RoutineData {
        if self.policy.seed_default_routine {
            RoutineData::new(DailyRoutine::seeded())
        } else {
            RoutineData::new(DailyRoutine::default())
        }
    }

    /// Read the stored record.
    ///
    /// Absent, unreadable or malformed data yields [`Self::default_record`],
    /// which is not written back; the next save persists it.
    pub async fn load(&self) -> RoutineData {
        let raw = match self.store.get(StorageKeys::ROUTINE_DATA).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.default_record(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read routine data, using defaults");
                return self.default_record();
            }
        };

        match serde_json::from_str::<RoutineData>(&raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "stored routine data is malformed, using defaults");
                self.default_record()
            }
        }
    }

    /// Apply the day rules to `candidate`, persist it and return it.
    ///
    /// # Errors
    /// Returns an error if the record cannot be serialized or written. The
    /// caller should keep its previous state in that case.
    pub async fn save(&self, candidate: RoutineData) -> Result<RoutineData> {
        let today = self.clock.today();
        let data = apply_day_rules(candidate, today, &self.policy);
        let json = serde_json::to_string(&data)?;
        self.store.set(StorageKeys::ROUTINE_DATA, &json).await?;
        tracing::debug!(streak = data.streak, %today, "saved routine data");
        Ok(data)
    }

    /// Today's progress for `data`.
    pub fn status(&self, data: &RoutineData) -> RoutineStatus {
        data.status(&self.policy)
    }

    /// `data` as it applies to today: completions left over from an earlier
    /// day are cleared and a broken streak is reset. Nothing is persisted.
    pub(crate) fn settle(&self, data: RoutineData) -> RoutineData {
        roll_over(data, self.clock.today())
    }
}

/// Apply, in order, the rollover, full-completion and streak rules for
/// `today`. Pure; [`RoutineStore::save`] persists the result.
pub fn apply_day_rules(candidate: RoutineData, today: NaiveDate, policy: &RoutinePolicy) -> RoutineData {
    let mut data = roll_over(candidate, today);

    if data.is_fully_completed(policy) && data.last_completed_date != Some(today) {
        data.streak = data.streak.saturating_add(1);
        data.last_completed_date = Some(today);
        tracing::info!(streak = data.streak, %today, "routine completed, streak advanced");
    }

    data.completions_date = Some(today);
    data
}

/// Start a new day if `data` has not been worked on yet today.
///
/// A rollover happens when the last completion is not today and either
/// nothing is checked or the checks are known to belong to an earlier day.
/// It clears both completion maps and resets the streak unless the last
/// completion was exactly yesterday.
fn roll_over(mut data: RoutineData, today: NaiveDate) -> RoutineData {
    if data.last_completed_date == Some(today) {
        return data;
    }

    let stale = data.completions_date.is_some_and(|date| date != today);
    if !stale && !data.completions.is_untouched() {
        return data;
    }

    data.completions.clear();
    data.completions_date = Some(today);

    if let Some(last) = data.last_completed_date {
        let yesterday = today.checked_sub_days(Days::new(1));
        if Some(last) != yesterday && data.streak != 0 {
            tracing::info!(%last, %today, previous = data.streak, "missed a day, streak reset");
            data.streak = 0;
        }
    }
    data
}
