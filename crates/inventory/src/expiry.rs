//! Expiry arithmetic and classification.
//!
//! Three independent views are derived from the same signed day count:
//! - [`classify`]: the five-way status shown as text on inventory cards,
//! - [`severity`]: the urgency level the UI maps to a colour,
//! - [`alert_status`]: the coarse bucket used by the dashboard alert list.
//!
//! The text view escalates at 7 days while severity escalates at 3. Both
//! breakpoints are intentional parts of the contract; keep them separate.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::InventoryItem;

/// Last day count (inclusive) that still counts as "this week".
pub const EXPIRING_THIS_WEEK_DAYS: i64 = 7;

/// Last day count (inclusive) that is rendered with high severity.
pub const HIGH_SEVERITY_DAYS: i64 = 3;

/// An expiry date string that cannot be used for expiry arithmetic.
///
/// Never fatal: callers treat the item as having no expiry date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidDateError {
    #[error("expiry date is empty")]
    Empty,

    #[error("malformed expiry date {value:?}: {reason}")]
    Malformed { value: String, reason: String },
}

/// Parse a stored expiry date into a calendar date in the reference timezone
/// `tz`.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive ISO-8601 timestamps.
/// Plain dates and naive timestamps are taken as already local to `tz`. RFC 3339
/// timestamps carry their own offset and are converted into `tz` first, so the
/// date is on the same calendar as [`Clock::today`](cookgenie_core::Clock::today).
/// Timestamps are then reduced to their calendar date: an expiry later on the
/// same day as "today" is still zero days away.
pub fn parse_expiry_date(raw: &str, tz: FixedOffset) -> Result<NaiveDate, InvalidDateError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InvalidDateError::Empty);
    }

    let date_err = match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => return Ok(date),
        Err(e) => e,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&tz).date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(InvalidDateError::Malformed {
        value: value.to_string(),
        reason: date_err.to_string(),
    })
}

/// Signed whole days from `today` until `expiry`.
///
/// Negative once the item has expired, zero on the expiry day itself.
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Fine-grained status shown next to an inventory item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiresToday,
    ExpiresTomorrow,
    ExpiringThisWeek,
    Fresh,
}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::ExpiresToday => "expires_today",
            ExpiryStatus::ExpiresTomorrow => "expires_tomorrow",
            ExpiryStatus::ExpiringThisWeek => "expiring_this_week",
            ExpiryStatus::Fresh => "fresh",
        }
    }
}

/// Bucket a day count into an [`ExpiryStatus`].
pub fn classify(days: i64) -> ExpiryStatus {
    match days {
        d if d < 0 => ExpiryStatus::Expired,
        0 => ExpiryStatus::ExpiresToday,
        1 => ExpiryStatus::ExpiresTomorrow,
        d if d <= EXPIRING_THIS_WEEK_DAYS => ExpiryStatus::ExpiringThisWeek,
        _ => ExpiryStatus::Fresh,
    }
}

/// Display text for a day count ("Expired", "Expires in 5 days", ...).
pub fn status_text(days: i64) -> String {
    match classify(days) {
        ExpiryStatus::Expired => "Expired".to_string(),
        ExpiryStatus::ExpiresToday => "Expires today".to_string(),
        ExpiryStatus::ExpiresTomorrow => "Expires tomorrow".to_string(),
        ExpiryStatus::ExpiringThisWeek => format!("Expires in {days} days"),
        ExpiryStatus::Fresh => "Fresh".to_string(),
    }
}

/// Presentation urgency. Ordered from least to most urgent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Urgency for a day count: critical once expired, high up to 3 days,
/// medium up to 7 days, low after that.
pub fn severity(days: i64) -> Severity {
    match days {
        d if d < 0 => Severity::Critical,
        d if d <= HIGH_SEVERITY_DAYS => Severity::High,
        d if d <= EXPIRING_THIS_WEEK_DAYS => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Coarse bucket used to group dashboard alerts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Expired,
    ExpiringSoon,
    ExpiringThisWeek,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Expired => "expired",
            AlertStatus::ExpiringSoon => "expiring_soon",
            AlertStatus::ExpiringThisWeek => "expiring_this_week",
        }
    }
}

/// Alert bucket for a day count, or `None` when the item is fresh and should
/// not alert at all.
///
/// Shares its breakpoints with [`severity`] (3 days) and [`classify`]
/// (7 days), so an item alerts exactly when its text status is not `Fresh`.
pub fn alert_status(days: i64) -> Option<AlertStatus> {
    match days {
        d if d < 0 => Some(AlertStatus::Expired),
        d if d <= HIGH_SEVERITY_DAYS => Some(AlertStatus::ExpiringSoon),
        d if d <= EXPIRING_THIS_WEEK_DAYS => Some(AlertStatus::ExpiringThisWeek),
        _ => None,
    }
}

/// Everything the inventory list needs to render an expiry badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryAssessment {
    pub days_until_expiry: i64,
    pub status: ExpiryStatus,
    pub severity: Severity,
    pub label: String,
}

impl ExpiryAssessment {
    pub fn from_days(days: i64) -> Self {
        Self {
            days_until_expiry: days,
            status: classify(days),
            severity: severity(days),
            label: status_text(days),
        }
    }
}

/// Assess one item against `today`, both resolved in the reference timezone
/// `tz`.
///
/// `Ok(None)` when the item carries no expiry date. A malformed date is
/// returned as an error so the caller can log it and render no badge.
pub fn assess(
    item: &InventoryItem,
    today: NaiveDate,
    tz: FixedOffset,
) -> Result<Option<ExpiryAssessment>, InvalidDateError> {
    let Some(expiry) = item.expiry(tz)? else {
        return Ok(None);
    };
    Ok(Some(ExpiryAssessment::from_days(days_until_expiry(
        expiry, today,
    ))))
}
