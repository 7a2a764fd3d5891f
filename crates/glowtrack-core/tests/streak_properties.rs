//! Property tests for the day rules.

use chrono::{Days, NaiveDate};
use glowtrack_core::routine::apply_day_rules;
use glowtrack_core::{RoutineData, RoutinePolicy, TimeOfDay};
use proptest::prelude::*;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// One simulated save: how many days passed since the previous one, and
/// which step (index into morning ++ evening) gets flipped first.
fn save_event() -> impl Strategy<Value = (u64, usize)> {
    (0u64..3, 0usize..8)
}

proptest! {
    #[test]
    fn streak_moves_at_most_one_per_day(events in prop::collection::vec(save_event(), 1..60)) {
        let policy = RoutinePolicy::default();
        let mut today = start();
        let mut data = RoutineData::default();
        let mut credited_days = Vec::new();

        for (gap, index) in events {
            today = today.checked_add_days(Days::new(gap)).unwrap();
            let time = if index < 4 { TimeOfDay::Morning } else { TimeOfDay::Evening };
            let id = data.routine.steps(time)[index % 4].id.clone();
            let flags = data.completions.get_mut(time);
            let flipped = !flags.get(&id).copied().unwrap_or(false);
            flags.insert(id, flipped);

            let before = data.streak;
            data = apply_day_rules(data, today, &policy);

            prop_assert!(data.streak <= before + 1);
            if data.streak == before + 1 {
                prop_assert!(!credited_days.contains(&today));
                prop_assert_eq!(data.last_completed_date, Some(today));
                credited_days.push(today);
            }
        }
    }

    #[test]
    fn completing_everything_credits_today_once(gap in 1u64..10, streak in 0u32..1000) {
        let policy = RoutinePolicy::default();
        let today = start().checked_add_days(Days::new(gap)).unwrap();
        let mut data = RoutineData::default();
        data.streak = streak;
        data.last_completed_date = Some(start());

        let rolled = apply_day_rules(data, today, &policy);
        let expected_base = if gap == 1 { streak } else { 0 };
        prop_assert_eq!(rolled.streak, expected_base);

        let mut full = rolled;
        for time in TimeOfDay::ALL {
            for step in full.routine.steps(time).to_vec() {
                full.completions.get_mut(time).insert(step.id, true);
            }
        }
        let credited = apply_day_rules(full, today, &policy);
        prop_assert_eq!(credited.streak, expected_base + 1);

        let again = apply_day_rules(credited.clone(), today, &policy);
        prop_assert_eq!(again.streak, credited.streak);
    }
}
