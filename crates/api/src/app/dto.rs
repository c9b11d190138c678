use chrono::{FixedOffset, NaiveDate};
use serde::Deserialize;

use cookgenie_inventory::{AlertList, ExpiryAlert, InventoryItem, assess};
use cookgenie_profiles::{Profile, UserPreferences};

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    /// Keep only the `limit` most urgent alerts.
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<f64>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn profile_to_json(profile: &Profile) -> serde_json::Value {
    serde_json::json!({
        "id": profile.id.to_string(),
        "name": profile.name,
        "email": profile.email,
        "avatar": profile.avatar,
        "created_at": profile.created_at.to_rfc3339(),
        "updated_at": profile.updated_at.to_rfc3339(),
    })
}

pub fn preferences_to_json(prefs: &UserPreferences) -> serde_json::Value {
    serde_json::json!({
        "profile_id": prefs.profile_id.to_string(),
        "dietary_restrictions": prefs.dietary_restrictions,
        "preferred_cuisines": prefs.preferred_cuisines,
        "disliked_ingredients": prefs.disliked_ingredients,
        "available_utensils": prefs.available_utensils,
        "max_cooking_time": prefs.max_cooking_time,
        "skill_level": prefs.skill_level,
        "created_at": prefs.created_at.to_rfc3339(),
        "updated_at": prefs.updated_at.to_rfc3339(),
    })
}

/// Item JSON plus its expiry badge as of `today`, with the stored date read
/// in the reference timezone `tz`.
///
/// Items with no usable expiry date get `"expiry": null`; an unparseable
/// stored date is logged, never reported to the client.
pub fn item_to_json(item: &InventoryItem, today: NaiveDate, tz: FixedOffset) -> serde_json::Value {
    let expiry = match assess(item, today, tz) {
        Ok(badge) => badge,
        Err(e) => {
            tracing::debug!(item_id = %item.id, error = %e, "no expiry badge for item");
            None
        }
    };

    serde_json::json!({
        "id": item.id.to_string(),
        "profile_id": item.profile_id.to_string(),
        "name": item.name,
        "quantity": item.quantity,
        "unit": item.unit.as_str(),
        "category": item.category,
        "expiry_date": item.expiry_date,
        "purchase_date": item.purchase_date,
        "notes": item.notes,
        "created_at": item.created_at.to_rfc3339(),
        "updated_at": item.updated_at.to_rfc3339(),
        "expiry": expiry,
    })
}

pub fn alert_to_json(alert: &ExpiryAlert<'_>, today: NaiveDate, tz: FixedOffset) -> serde_json::Value {
    serde_json::json!({
        "item": item_to_json(alert.item, today, tz),
        "days_until_expiry": alert.days_until_expiry,
        "status": alert.status.as_str(),
        "summary": alert.summary(),
    })
}

pub fn alert_list_to_json(
    list: &AlertList<'_>,
    limit: Option<usize>,
    today: NaiveDate,
    tz: FixedOffset,
) -> serde_json::Value {
    let shown = match limit {
        Some(n) => list.top(n),
        None => &list.alerts[..],
    };

    serde_json::json!({
        "as_of": today.format("%Y-%m-%d").to_string(),
        "total": list.len(),
        "alerts": shown.iter().map(|a| alert_to_json(a, today, tz)).collect::<Vec<_>>(),
        "skipped_item_ids": list
            .diagnostics
            .iter()
            .map(|d| d.item_id.to_string())
            .collect::<Vec<_>>(),
    })
}
