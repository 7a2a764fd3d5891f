use clap::Subcommand;
use glowtrack_core::{ProfileField, ProfileStore, UserData};

use super::open_database;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Update one profile field, keeping the others
    Set {
        /// name, age, skinType, sensitivities, goals or photoUri
        field: String,
        /// New value; lists are comma-separated
        value: String,
    },
}

pub async fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let (_, db) = open_database()?;
    let profiles = ProfileStore::new(db);

    match action {
        ProfileAction::Show => {
            let profile = profiles.load().await.unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Set { field, value } => {
            let field: ProfileField = field.parse()?;
            let updated = profiles.update(UserData::from_field(field, &value)?).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
    }
    Ok(())
}
