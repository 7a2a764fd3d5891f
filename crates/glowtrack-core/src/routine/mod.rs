//! Daily skincare routine tracking.
//!
//! Two checklists (morning and evening), a per-step completion flag for each,
//! and a streak of consecutive days on which both checklists were finished.
//!
//! - [`RoutineStore`] loads and saves the record and applies the day rules
//! - `toggle`, `add_step` and `delete_step` mutate a copy and save it
//! - [`RoutineStatus`] summarises today's progress for display

mod clock;
mod editor;
mod store;
mod toggle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use store::{apply_day_rules, RoutineStore};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Which of the two daily checklists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 2] = [TimeOfDay::Morning, TimeOfDay::Evening];

    /// First letter of the name, used as the step id prefix.
    pub fn id_prefix(self) -> char {
        match self {
            TimeOfDay::Morning => 'm',
            TimeOfDay::Evening => 'e',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" | "am" | "m" => Ok(TimeOfDay::Morning),
            "evening" | "pm" | "e" => Ok(TimeOfDay::Evening),
            other => Err(format!("unknown time of day: {other}")),
        }
    }
}

/// One checklist entry. Ids are unique within their list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: String,
    pub text: String,
}

impl RoutineStep {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Both checklists, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoutine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub morning: Vec<RoutineStep>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evening: Vec<RoutineStep>,
}

impl DailyRoutine {
    /// The checklist a fresh install starts with.
    pub fn seeded() -> Self {
        Self {
            morning: vec![
                RoutineStep::new("m1", "Cleanser"),
                RoutineStep::new("m2", "Toner"),
                RoutineStep::new("m3", "Moisturizer"),
                RoutineStep::new("m4", "Sunscreen"),
            ],
            evening: vec![
                RoutineStep::new("e1", "Makeup Remover"),
                RoutineStep::new("e2", "Cleanser"),
                RoutineStep::new("e3", "Serum"),
                RoutineStep::new("e4", "Night Cream"),
            ],
        }
    }

    pub fn steps(&self, time: TimeOfDay) -> &[RoutineStep] {
        match time {
            TimeOfDay::Morning => &self.morning,
            TimeOfDay::Evening => &self.evening,
        }
    }

    pub fn steps_mut(&mut self, time: TimeOfDay) -> &mut Vec<RoutineStep> {
        match time {
            TimeOfDay::Morning => &mut self.morning,
            TimeOfDay::Evening => &mut self.evening,
        }
    }
}

/// Step id to completion flag. Absent means not completed.
pub type RoutineCompletion = BTreeMap<String, bool>;

/// Completion flags for both checklists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub morning: RoutineCompletion,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evening: RoutineCompletion,
}

impl Completions {
    pub fn get(&self, time: TimeOfDay) -> &RoutineCompletion {
        match time {
            TimeOfDay::Morning => &self.morning,
            TimeOfDay::Evening => &self.evening,
        }
    }

    pub fn get_mut(&mut self, time: TimeOfDay) -> &mut RoutineCompletion {
        match time {
            TimeOfDay::Morning => &mut self.morning,
            TimeOfDay::Evening => &mut self.evening,
        }
    }

    pub fn is_checked(&self, time: TimeOfDay, step_id: &str) -> bool {
        self.get(time).get(step_id).copied().unwrap_or(false)
    }

    /// True when no step in either map is checked.
    pub fn is_untouched(&self) -> bool {
        !self.morning.values().any(|v| *v) && !self.evening.values().any(|v| *v)
    }

    pub fn clear(&mut self) {
        self.morning.clear();
        self.evening.clear();
    }
}

/// The persisted routine record, stored as JSON under `routineData`.
///
/// Missing or null nested fields deserialize to their defaults so that
/// legacy records always reach the day rules in full shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineData {
    #[serde(default = "DailyRoutine::seeded", deserialize_with = "null_as_seeded")]
    pub routine: DailyRoutine,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completions: Completions,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
    /// Day the completion maps belong to. Absent on records written before
    /// it was tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions_date: Option<NaiveDate>,
}

impl RoutineData {
    /// A fresh record: the given routine, nothing checked, no streak.
    pub fn new(routine: DailyRoutine) -> Self {
        Self {
            routine,
            completions: Completions::default(),
            streak: 0,
            last_completed_date: None,
            completions_date: None,
        }
    }

    /// Number of steps of the current list that are checked. Completion
    /// entries for ids no longer in the list are ignored.
    pub fn completed_count(&self, time: TimeOfDay) -> usize {
        self.routine
            .steps(time)
            .iter()
            .filter(|step| self.completions.is_checked(time, &step.id))
            .count()
    }

    pub fn progress(&self, time: TimeOfDay) -> ChecklistProgress {
        ChecklistProgress::new(self.completed_count(time), self.routine.steps(time).len())
    }

    /// Both lists fully checked. A single empty list counts as complete;
    /// two empty lists only count when `credit_empty_routine` is set.
    pub fn is_fully_completed(&self, policy: &RoutinePolicy) -> bool {
        let morning = self.progress(TimeOfDay::Morning);
        let evening = self.progress(TimeOfDay::Evening);
        if morning.total == 0 && evening.total == 0 {
            return policy.credit_empty_routine;
        }
        morning.is_complete() && evening.is_complete()
    }

    pub fn status(&self, policy: &RoutinePolicy) -> RoutineStatus {
        let morning = self.progress(TimeOfDay::Morning);
        let evening = self.progress(TimeOfDay::Evening);
        let day = if self.is_fully_completed(policy) {
            DayStatus::FullyComplete
        } else if morning.completed == 0 && evening.completed == 0 {
            DayStatus::NotStarted
        } else {
            DayStatus::InProgress
        };
        RoutineStatus {
            morning,
            evening,
            day,
            streak: self.streak,
            last_completed_date: self.last_completed_date,
        }
    }
}

impl Default for RoutineData {
    fn default() -> Self {
        Self::new(DailyRoutine::seeded())
    }
}

/// Rules that are a product decision rather than fixed behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutinePolicy {
    /// Count a day with two empty checklists as fully completed.
    pub credit_empty_routine: bool,
    /// Start a fresh install with [`DailyRoutine::seeded`] instead of empty lists.
    pub seed_default_routine: bool,
}

impl Default for RoutinePolicy {
    fn default() -> Self {
        Self {
            credit_empty_routine: false,
            seed_default_routine: true,
        }
    }
}

/// Progress through the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    NotStarted,
    InProgress,
    FullyComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    pub completed: usize,
    pub total: usize,
    /// Display form, e.g. `"2/4 steps"`.
    pub label: String,
}

impl ChecklistProgress {
    fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            label: format!("{completed}/{total} steps"),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Snapshot of today's progress and the streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStatus {
    pub morning: ChecklistProgress,
    pub evening: ChecklistProgress,
    pub day: DayStatus,
    pub streak: u32,
    pub last_completed_date: Option<NaiveDate>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_seeded<'de, D>(deserializer: D) -> Result<DailyRoutine, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DailyRoutine>::deserialize(deserializer)?.unwrap_or_else(DailyRoutine::seeded))
}
