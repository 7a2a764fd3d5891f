use super::{Clock, RoutineData, RoutineStore, TimeOfDay};
use crate::error::Result;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore, C: Clock> RoutineStore<S, C> {
    /// Flip the completion flag of `step_id` and save.
    ///
    /// An absent flag counts as unchecked, so the first toggle checks the
    /// step. Unchecking after the day was credited does not take the streak
    /// back.
    pub async fn toggle(
        &self,
        state: &RoutineData,
        time: TimeOfDay,
        step_id: &str,
    ) -> Result<RoutineData> {
        let mut next = self.settle(state.clone());
        let flags = next.completions.get_mut(time);
        let checked = !flags.get(step_id).copied().unwrap_or(false);
        flags.insert(step_id.to_string(), checked);
        tracing::debug!(%time, step_id, checked, "toggled routine step");
        self.save(next).await
    }
}
