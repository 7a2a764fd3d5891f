use super::{Clock, RoutineData, RoutineStep, RoutineStore, TimeOfDay};
use crate::error::Result;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore, C: Clock> RoutineStore<S, C> {
    /// Append a step with the trimmed `text` to the end of the list and save.
    ///
    /// Blank text is ignored: `state` is returned unchanged and nothing is
    /// written.
    pub async fn add_step(
        &self,
        state: &RoutineData,
        time: TimeOfDay,
        text: &str,
    ) -> Result<RoutineData> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(state.clone());
        }

        let mut next = self.settle(state.clone());
        let id = self.next_step_id(&next, time);
        tracing::debug!(%time, id = %id, "adding routine step");
        next.routine
            .steps_mut(time)
            .push(RoutineStep::new(id, text));
        self.save(next).await
    }

    /// Remove the step and its completion flag, then save.
    ///
    /// Confirmation is the caller's job. An unknown id still saves.
    pub async fn delete_step(
        &self,
        state: &RoutineData,
        time: TimeOfDay,
        step_id: &str,
    ) -> Result<RoutineData> {
        let mut next = self.settle(state.clone());
        next.routine.steps_mut(time).retain(|step| step.id != step_id);
        next.completions.get_mut(time).remove(step_id);
        tracing::debug!(%time, step_id, "deleted routine step");
        self.save(next).await
    }

    /// `<prefix><millis>`, bumped past any id already in the list.
    fn next_step_id(&self, data: &RoutineData, time: TimeOfDay) -> String {
        let steps = data.routine.steps(time);
        let mut stamp = self.clock().now_millis();
        loop {
            let id = format!("{}{}", time.id_prefix(), stamp);
            if !steps.iter().any(|step| step.id == id) {
                return id;
            }
            stamp += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::routine::{FixedClock, RoutineStore, TimeOfDay};
    use crate::storage::{MemoryStore, StorageKeys};

    fn store() -> RoutineStore<MemoryStore, FixedClock> {
        RoutineStore::with_clock(
            MemoryStore::new(),
            FixedClock::new(Utc.timestamp_millis_opt(1_699_999_999_999).unwrap()),
        )
    }

    #[tokio::test]
    async fn add_appends_trimmed_step_with_timestamp_id() {
        let store = store();
        let data = store.load().await;
        let next = store
            .add_step(&data, TimeOfDay::Morning, "  Vitamin C serum ")
            .await
            .unwrap();
        let last = next.routine.morning.last().unwrap();
        assert_eq!(last.id, "m1699999999999");
        assert_eq!(last.text, "Vitamin C serum");
        assert_eq!(next.routine.morning.len(), 5);
        assert_eq!(next.routine.evening.len(), 4);
    }

    #[tokio::test]
    async fn blank_text_is_a_no_op() {
        let store = store();
        let data = store.load().await;
        let next = store.add_step(&data, TimeOfDay::Morning, "  ").await.unwrap();
        assert_eq!(next.routine.morning.len(), 4);
        assert_eq!(next, data);
        assert!(store.kv().raw(StorageKeys::ROUTINE_DATA).is_none());
    }

    #[tokio::test]
    async fn ids_stay_unique_within_the_same_millisecond() {
        let store = store();
        let data = store.load().await;
        let a = store.add_step(&data, TimeOfDay::Evening, "Retinol").await.unwrap();
        let b = store.add_step(&a, TimeOfDay::Evening, "Eye cream").await.unwrap();
        let ids: Vec<_> = b.routine.evening.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids[4], "e1699999999999");
        assert_eq!(ids[5], "e1700000000000");
    }

    #[tokio::test]
    async fn delete_removes_step_and_completion() {
        let store = RoutineStore::with_clock(
            MemoryStore::new(),
            FixedClock::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        );
        let data = store.load().await;
        let data = store.toggle(&data, TimeOfDay::Morning, "m1").await.unwrap();
        let data = store.toggle(&data, TimeOfDay::Morning, "m2").await.unwrap();

        let next = store.delete_step(&data, TimeOfDay::Morning, "m1").await.unwrap();
        assert_eq!(next.routine.morning.len(), 3);
        assert!(next.routine.morning.iter().all(|s| s.id != "m1"));
        assert!(!next.completions.morning.contains_key("m1"));
        assert!(next.completions.is_checked(TimeOfDay::Morning, "m2"));

        let reloaded = store.load().await;
        assert!(reloaded.routine.morning.iter().all(|s| s.id != "m1"));
    }

    #[tokio::test]
    async fn deleting_unknown_id_changes_nothing_but_saves() {
        let store = store();
        let data = store.load().await;
        let next = store.delete_step(&data, TimeOfDay::Evening, "e42").await.unwrap();
        assert_eq!(next.routine, data.routine);
        assert!(store.kv().raw(StorageKeys::ROUTINE_DATA).is_some());
    }
}
