//! Routine checklist commands.
//!
//! Every mutating command prints the saved record as JSON. A failed write
//! exits non-zero and leaves the stored record as it was.

use clap::Subcommand;
use glowtrack_core::{RoutineStore, TimeOfDay};

use super::open_database;

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Show the stored routine record
    Show,
    /// Show today's progress and the streak
    Status,
    /// Check or uncheck a step
    Toggle {
        /// morning or evening
        time: TimeOfDay,
        /// Step id (e.g. "m1")
        step_id: String,
    },
    /// Add a step to the end of a checklist
    Add {
        /// morning or evening
        time: TimeOfDay,
        /// Step text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a step
    Delete {
        /// morning or evening
        time: TimeOfDay,
        /// Step id
        step_id: String,
    },
}

pub async fn run(action: RoutineAction) -> Result<(), Box<dyn std::error::Error>> {
    let (config, db) = open_database()?;
    let store = RoutineStore::new(db).with_policy(config.routine_policy());
    let data = store.load().await;

    let output = match action {
        RoutineAction::Show => serde_json::to_string_pretty(&data)?,
        RoutineAction::Status => serde_json::to_string_pretty(&store.status(&data))?,
        RoutineAction::Toggle { time, step_id } => {
            if !data.routine.steps(time).iter().any(|s| s.id == step_id) {
                return Err(format!("no {time} step with id '{step_id}'").into());
            }
            let saved = store.toggle(&data, time, &step_id).await?;
            serde_json::to_string_pretty(&saved)?
        }
        RoutineAction::Add { time, text } => {
            let saved = store.add_step(&data, time, &text.join(" ")).await?;
            serde_json::to_string_pretty(&saved)?
        }
        RoutineAction::Delete { time, step_id } => {
            let saved = store.delete_step(&data, time, &step_id).await?;
            serde_json::to_string_pretty(&saved)?
        }
    };
    println!("{output}");
    Ok(())
}
