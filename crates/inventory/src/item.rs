use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use cookgenie_core::patch::{nullable, set_value};
use cookgenie_core::{DomainError, DomainResult, Entity, InventoryItemId, ProfileId};

use crate::expiry::{InvalidDateError, parse_expiry_date};
use crate::unit::Unit;

const MAX_NAME_LEN: usize = 255;
const MAX_CATEGORY_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 500;

/// A stocked ingredient belonging to one profile.
///
/// Dates are kept as the strings the record was stored with. Older records may
/// carry values that no longer parse; those must still list and render, so
/// parsing happens on read via [`InventoryItem::expiry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub profile_id: ProfileId,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub category: Option<String>,
    pub expiry_date: Option<String>,
    pub purchase_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Build a new record from a validated payload.
    pub fn create(id: InventoryItemId, new: NewInventoryItem, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            profile_id: new.profile_id,
            name: new.name.trim().to_string(),
            quantity: new.quantity,
            unit: new.unit,
            category: normalize(new.category),
            expiry_date: normalize(new.expiry_date),
            purchase_date: normalize(new.purchase_date),
            notes: normalize(new.notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `patch`: absent fields keep their value, `null` clears an optional
    /// field.
    pub fn apply_patch(&mut self, patch: InventoryItemPatch, now: DateTime<Utc>) -> DomainResult<()> {
        patch.validate()?;

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(category) = patch.category {
            self.category = normalize(category);
        }
        if let Some(expiry_date) = patch.expiry_date {
            self.expiry_date = normalize(expiry_date);
        }
        if let Some(purchase_date) = patch.purchase_date {
            self.purchase_date = normalize(purchase_date);
        }
        if let Some(notes) = patch.notes {
            self.notes = normalize(notes);
        }

        self.updated_at = now;
        Ok(())
    }

    /// Parsed expiry date in the reference timezone `tz`, `Ok(None)` when the
    /// item has none.
    pub fn expiry(&self, tz: FixedOffset) -> Result<Option<NaiveDate>, InvalidDateError> {
        self.expiry_date
            .as_deref()
            .map(|raw| parse_expiry_date(raw, tz))
            .transpose()
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn profile_id(&self) -> ProfileId {
        self.profile_id
    }
}

/// Payload for creating an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub profile_id: ProfileId,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewInventoryItem {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_quantity(self.quantity)?;
        validate_optional_fields(
            self.category.as_deref(),
            self.expiry_date.as_deref(),
            self.purchase_date.as_deref(),
            self.notes.as_deref(),
        )
    }
}

/// Partial update.
///
/// `None` leaves the stored value untouched. The optional fields also accept
/// an explicit `null` (`Some(None)`), which clears the stored value; required
/// fields treat `null` like an absent key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub purchase_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl InventoryItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        validate_optional_fields(
            set_value(&self.category),
            set_value(&self.expiry_date),
            set_value(&self.purchase_date),
            set_value(&self.notes),
        )
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

fn validate_quantity(quantity: f64) -> DomainResult<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(DomainError::validation("quantity must be a positive number"));
    }
    Ok(())
}

fn validate_optional_fields(
    category: Option<&str>,
    expiry_date: Option<&str>,
    purchase_date: Option<&str>,
    notes: Option<&str>,
) -> DomainResult<()> {
    if category.is_some_and(|c| c.chars().count() > MAX_CATEGORY_LEN) {
        return Err(DomainError::validation(format!(
            "category cannot exceed {MAX_CATEGORY_LEN} characters"
        )));
    }
    if notes.is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
        return Err(DomainError::validation(format!(
            "notes cannot exceed {MAX_NOTES_LEN} characters"
        )));
    }
    validate_date("expiry_date", expiry_date)?;
    validate_date("purchase_date", purchase_date)
}

// New writes must carry parseable dates; only legacy data is tolerated.
// Whether a value parses does not depend on the timezone it is read in.
fn validate_date(field: &str, value: Option<&str>) -> DomainResult<()> {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(raw) => parse_expiry_date(raw, Utc.fix())
            .map(|_| ())
            .map_err(|e| DomainError::validation(format!("{field}: {e}"))),
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
