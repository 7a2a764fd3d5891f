//! Onboarding profile stored under `userData`.
//!
//! Updates merge field-by-field into the stored profile, so a partial update
//! never wipes answers given earlier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{KeyValueStore, StorageKeys};

/// Age brackets offered during onboarding.
pub const AGE_RANGES: [&str; 6] = ["13-17", "18-24", "25-34", "35-44", "45-54", "55+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Normal,
    Sensitive,
}

impl FromStr for SkinType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oily" => Ok(SkinType::Oily),
            "dry" => Ok(SkinType::Dry),
            "combination" => Ok(SkinType::Combination),
            "normal" => Ok(SkinType::Normal),
            "sensitive" => Ok(SkinType::Sensitive),
            other => Err(invalid("skinType", format!("unknown skin type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinGoal {
    AntiAging,
    Acne,
    Brightening,
    Hydration,
    EvenTone,
    PoreMinimizing,
}

impl FromStr for SkinGoal {
    type Err = ValidationError;

    /// Accepts both the stored names and the onboarding labels
    /// ("Acne control", "Minimize pores").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anti-aging" => Ok(SkinGoal::AntiAging),
            "acne" | "acne control" => Ok(SkinGoal::Acne),
            "brightening" => Ok(SkinGoal::Brightening),
            "hydration" => Ok(SkinGoal::Hydration),
            "even-tone" | "even tone" => Ok(SkinGoal::EvenTone),
            "pore-minimizing" | "minimize pores" => Ok(SkinGoal::PoreMinimizing),
            other => Err(invalid("goals", format!("unknown skin goal '{other}'"))),
        }
    }
}

/// Answers collected during onboarding. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<SkinGoal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}

/// Profile field addressed by name, as stored in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Age,
    SkinType,
    Sensitivities,
    Goals,
    PhotoUri,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::SkinType,
        ProfileField::Sensitivities,
        ProfileField::Goals,
        ProfileField::PhotoUri,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::SkinType => "skinType",
            ProfileField::Sensitivities => "sensitivities",
            ProfileField::Goals => "goals",
            ProfileField::PhotoUri => "photoUri",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownField(wanted.to_string()))
    }
}

impl UserData {
    /// Overlay every field set in `update` onto `self`.
    pub fn merge(mut self, update: UserData) -> Self {
        if update.name.is_some() {
            self.name = update.name;
        }
        if update.age.is_some() {
            self.age = update.age;
        }
        if update.skin_type.is_some() {
            self.skin_type = update.skin_type;
        }
        if update.sensitivities.is_some() {
            self.sensitivities = update.sensitivities;
        }
        if update.goals.is_some() {
            self.goals = update.goals;
        }
        if update.photo_uri.is_some() {
            self.photo_uri = update.photo_uri;
        }
        self
    }

    /// A single-field update parsed from text. List fields take a
    /// comma-separated value.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, an age outside
    /// [`AGE_RANGES`], or an unknown skin type or goal.
    pub fn from_field(field: ProfileField, value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let mut update = UserData::default();
        match field {
            ProfileField::Name => {
                if value.is_empty() {
                    return Err(invalid("name", "must not be empty".to_string()));
                }
                update.name = Some(value.to_string());
            }
            ProfileField::Age => {
                if !AGE_RANGES.contains(&value) {
                    return Err(invalid(
                        "age",
                        format!("expected one of {}", AGE_RANGES.join(", ")),
                    ));
                }
                update.age = Some(value.to_string());
            }
            ProfileField::SkinType => update.skin_type = Some(value.parse()?),
            ProfileField::Sensitivities => {
                update.sensitivities = Some(split_list(value).map(str::to_string).collect());
            }
            ProfileField::Goals => {
                update.goals = Some(
                    split_list(value)
                        .map(|goal| goal.parse::<SkinGoal>())
                        .collect::<Result<Vec<SkinGoal>, _>>()?,
                );
            }
            ProfileField::PhotoUri => update.photo_uri = Some(value.to_string()),
        }
        Ok(update)
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn invalid(field: &str, message: String) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message,
    }
}

/// Reads and writes the `userData` record.
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored profile, or `None` if there is none or it cannot be read.
    pub async fn load(&self) -> Option<UserData> {
        match self.store.get(StorageKeys::USER_DATA).await {
            Ok(Some(raw)) => serde_json::from_str(&raw)
                .map_err(|e| tracing::warn!(error = %e, "stored profile is malformed"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read profile");
                None
            }
        }
    }

    /// Replace the stored profile.
    pub async fn save(&self, profile: &UserData) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(StorageKeys::USER_DATA, &json).await?;
        Ok(())
    }

    /// Merge `update` into the stored profile and return the result.
    pub async fn update(&self, update: UserData) -> Result<UserData> {
        let merged = self.load().await.unwrap_or_default().merge(update);
        self.save(&merged).await?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn merge_keeps_fields_missing_from_update() {
        let base = UserData {
            name: Some("Ana".into()),
            skin_type: Some(SkinType::Dry),
            ..UserData::default()
        };
        let merged = base.merge(UserData {
            photo_uri: Some("file:///selfie.jpg".into()),
            ..UserData::default()
        });
        assert_eq!(merged.name.as_deref(), Some("Ana"));
        assert_eq!(merged.skin_type, Some(SkinType::Dry));
        assert_eq!(merged.photo_uri.as_deref(), Some("file:///selfie.jpg"));
    }

    #[test]
    fn goals_accept_onboarding_labels() {
        let update = UserData::from_field(ProfileField::Goals, "Acne control, even-tone, Minimize pores")
            .unwrap();
        assert_eq!(
            update.goals,
            Some(vec![SkinGoal::Acne, SkinGoal::EvenTone, SkinGoal::PoreMinimizing])
        );
    }

    #[test]
    fn rejects_blank_name_and_unknown_age() {
        assert!(UserData::from_field(ProfileField::Name, "   ").is_err());
        assert!(UserData::from_field(ProfileField::Age, "30").is_err());
        assert!(UserData::from_field(ProfileField::Age, "25-34").is_ok());
    }

    #[test]
    fn field_names_match_stored_keys() {
        assert_eq!("skintype".parse::<ProfileField>().unwrap(), ProfileField::SkinType);
        assert_eq!(ProfileField::PhotoUri.to_string(), "photoUri");
        assert!("email".parse::<ProfileField>().is_err());
    }

    #[test]
    fn serializes_like_the_onboarding_record() {
        let data = UserData {
            skin_type: Some(SkinType::Combination),
            goals: Some(vec![SkinGoal::AntiAging]),
            ..UserData::default()
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"skinType":"combination","goals":["anti-aging"]}"#);
    }

    #[tokio::test]
    async fn update_merges_into_stored_profile() {
        let profiles = ProfileStore::new(MemoryStore::new());
        assert!(profiles.load().await.is_none());

        profiles
            .update(UserData::from_field(ProfileField::Name, "Ana").unwrap())
            .await
            .unwrap();
        let merged = profiles
            .update(UserData::from_field(ProfileField::SkinType, "Oily").unwrap())
            .await
            .unwrap();
        assert_eq!(merged.name.as_deref(), Some("Ana"));
        assert_eq!(merged.skin_type, Some(SkinType::Oily));
        assert_eq!(profiles.load().await, Some(merged));
    }

    #[tokio::test]
    async fn malformed_profile_reads_as_missing() {
        let store = MemoryStore::new();
        store.insert_raw(StorageKeys::USER_DATA, "{\"skinType\":\"scaly\"}");
        let profiles = ProfileStore::new(store);
        assert!(profiles.load().await.is_none());
    }
}
