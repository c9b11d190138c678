//! Cooking preferences, one set per profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cookgenie_core::patch::nullable;
use cookgenie_core::{DomainError, DomainResult, Entity, ProfileId};

const MAX_TAG_LEN: usize = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Dietary and kitchen constraints for one profile.
///
/// Keyed by the owning profile: a profile has at most one preference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub profile_id: ProfileId,
    pub dietary_restrictions: Vec<String>,
    pub preferred_cuisines: Vec<String>,
    pub disliked_ingredients: Vec<String>,
    pub available_utensils: Vec<String>,
    /// Upper bound on total cooking time, in minutes.
    pub max_cooking_time: Option<u32>,
    pub skill_level: Option<SkillLevel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    pub fn create(new: NewPreferences, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            profile_id: new.profile_id,
            dietary_restrictions: tags(new.dietary_restrictions),
            preferred_cuisines: tags(new.preferred_cuisines),
            disliked_ingredients: tags(new.disliked_ingredients),
            available_utensils: tags(new.available_utensils),
            max_cooking_time: new.max_cooking_time,
            skill_level: new.skill_level,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `patch`: absent fields keep their value, `null` clears.
    pub fn apply_patch(&mut self, patch: PreferencesPatch, now: DateTime<Utc>) -> DomainResult<()> {
        patch.validate()?;

        if let Some(v) = patch.dietary_restrictions {
            self.dietary_restrictions = tags(v);
        }
        if let Some(v) = patch.preferred_cuisines {
            self.preferred_cuisines = tags(v);
        }
        if let Some(v) = patch.disliked_ingredients {
            self.disliked_ingredients = tags(v);
        }
        if let Some(v) = patch.available_utensils {
            self.available_utensils = tags(v);
        }
        if let Some(v) = patch.max_cooking_time {
            self.max_cooking_time = v;
        }
        if let Some(v) = patch.skill_level {
            self.skill_level = v;
        }

        self.updated_at = now;
        Ok(())
    }
}

impl Entity for UserPreferences {
    type Id = ProfileId;

    fn id(&self) -> &Self::Id {
        &self.profile_id
    }

    fn profile_id(&self) -> ProfileId {
        self.profile_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPreferences {
    pub profile_id: ProfileId,
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_cuisines: Option<Vec<String>>,
    #[serde(default)]
    pub disliked_ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub available_utensils: Option<Vec<String>>,
    #[serde(default)]
    pub max_cooking_time: Option<u32>,
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
}

impl NewPreferences {
    pub fn validate(&self) -> DomainResult<()> {
        for (field, list) in [
            ("dietary_restrictions", &self.dietary_restrictions),
            ("preferred_cuisines", &self.preferred_cuisines),
            ("disliked_ingredients", &self.disliked_ingredients),
            ("available_utensils", &self.available_utensils),
        ] {
            validate_tags(field, list.as_deref())?;
        }
        validate_cooking_time(self.max_cooking_time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreferencesPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub dietary_restrictions: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub preferred_cuisines: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub disliked_ingredients: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub available_utensils: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub max_cooking_time: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub skill_level: Option<Option<SkillLevel>>,
}

impl PreferencesPatch {
    pub fn validate(&self) -> DomainResult<()> {
        for (field, list) in [
            ("dietary_restrictions", &self.dietary_restrictions),
            ("preferred_cuisines", &self.preferred_cuisines),
            ("disliked_ingredients", &self.disliked_ingredients),
            ("available_utensils", &self.available_utensils),
        ] {
            validate_tags(field, list.as_ref().and_then(|v| v.as_deref()))?;
        }
        validate_cooking_time(self.max_cooking_time.flatten())
    }
}

fn validate_tags(field: &str, list: Option<&[String]>) -> DomainResult<()> {
    match list.into_iter().flatten().find(|t| t.trim().chars().count() > MAX_TAG_LEN) {
        Some(_) => Err(DomainError::validation(format!(
            "{field} entries cannot exceed {MAX_TAG_LEN} characters"
        ))),
        None => Ok(()),
    }
}

fn validate_cooking_time(minutes: Option<u32>) -> DomainResult<()> {
    if minutes == Some(0) {
        return Err(DomainError::validation("max_cooking_time must be at least one minute"));
    }
    Ok(())
}

/// Trimmed, non-blank, first occurrence kept.
fn tags(list: Option<Vec<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in list.into_iter().flatten() {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
