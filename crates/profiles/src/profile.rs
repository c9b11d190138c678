use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cookgenie_core::patch::{nullable, set_value};
use cookgenie_core::{DomainError, DomainResult, Entity, ProfileId};

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;
const MAX_AVATAR_LEN: usize = 255;

/// A member of the household. Inventory and preferences hang off its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn create(id: ProfileId, new: NewProfile, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            name: new.name.trim().to_string(),
            email: normalize(new.email),
            avatar: normalize(new.avatar),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `patch`: absent fields keep their value, `null` clears email or
    /// avatar.
    pub fn apply_patch(&mut self, patch: ProfilePatch, now: DateTime<Utc>) -> DomainResult<()> {
        patch.validate()?;

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = normalize(email);
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = normalize(avatar);
        }

        self.updated_at = now;
        Ok(())
    }

    /// Emails are unique per household, compared case-insensitively.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(email.trim()))
    }
}

impl Entity for Profile {
    type Id = ProfileId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn profile_id(&self) -> ProfileId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl NewProfile {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_email(self.email.as_deref())?;
        validate_avatar(self.avatar.as_deref())
    }

    /// The email this payload would store, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// Partial update. `name: null` is ignored; `email` and `avatar` accept `null`
/// to clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_email(set_value(&self.email))?;
        validate_avatar(set_value(&self.avatar))
    }

    /// The email this patch would store, if it sets a non-blank one.
    pub fn email(&self) -> Option<&str> {
        set_value(&self.email).map(str::trim).filter(|e| !e.is_empty())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: Option<&str>) -> DomainResult<()> {
    let email = match email.map(str::trim) {
        None | Some("") => return Ok(()),
        Some(e) => e,
    };
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(DomainError::validation(format!(
            "email cannot exceed {MAX_EMAIL_LEN} characters"
        )));
    }
    if !looks_like_email(email) {
        return Err(DomainError::validation(format!("email {email:?} is not a valid address")));
    }
    Ok(())
}

// local@domain.tld, no whitespace, a dot inside the domain.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn validate_avatar(avatar: Option<&str>) -> DomainResult<()> {
    if avatar.is_some_and(|a| a.trim().chars().count() > MAX_AVATAR_LEN) {
        return Err(DomainError::validation(format!(
            "avatar cannot exceed {MAX_AVATAR_LEN} characters"
        )));
    }
    Ok(())
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
