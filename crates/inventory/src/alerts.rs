//! Dashboard expiry alerts.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use cookgenie_core::InventoryItemId;

use crate::expiry::{AlertStatus, InvalidDateError, alert_status, days_until_expiry};
use crate::item::InventoryItem;

/// An item that is expired or expires within the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiryAlert<'a> {
    pub item: &'a InventoryItem,
    pub days_until_expiry: i64,
    pub status: AlertStatus,
}

impl ExpiryAlert<'_> {
    /// One-line dashboard text: "Expired" or "Expires in N day(s)".
    pub fn summary(&self) -> String {
        match self.status {
            AlertStatus::Expired => "Expired".to_string(),
            AlertStatus::ExpiringSoon | AlertStatus::ExpiringThisWeek => {
                let days = self.days_until_expiry.unsigned_abs();
                let suffix = if days == 1 { "" } else { "s" };
                format!("Expires in {days} day{suffix}")
            }
        }
    }
}

/// An item skipped because its stored expiry date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryDiagnostic {
    pub item_id: InventoryItemId,
    pub error: InvalidDateError,
}

/// Result of [`build_alert_list`]: alerts, most urgent first, plus the items
/// that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertList<'a> {
    pub alerts: Vec<ExpiryAlert<'a>>,
    pub diagnostics: Vec<ExpiryDiagnostic>,
}

impl<'a> AlertList<'a> {
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// The `n` most urgent alerts.
    pub fn top(&self, n: usize) -> &[ExpiryAlert<'a>] {
        &self.alerts[..n.min(self.alerts.len())]
    }

    pub fn count(&self, status: AlertStatus) -> usize {
        self.alerts.iter().filter(|a| a.status == status).count()
    }
}

/// Collect expiry alerts for `items` as of `today`, with stored dates read in
/// the reference timezone `tz`.
///
/// Items without an expiry date and items more than a week out are left out.
/// Items whose date does not parse are left out too and reported in
/// `diagnostics`. Alerts are ordered by `days_until_expiry` ascending; ties
/// keep input order.
pub fn build_alert_list<'a, I>(items: I, today: NaiveDate, tz: FixedOffset) -> AlertList<'a>
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    let mut list = AlertList::default();

    for item in items {
        let expiry = match item.expiry(tz) {
            Ok(Some(date)) => date,
            Ok(None) => continue,
            Err(error) => {
                tracing::warn!(
                    item_id = %item.id,
                    profile_id = %item.profile_id,
                    error = %error,
                    "skipping inventory item with unusable expiry date"
                );
                list.diagnostics.push(ExpiryDiagnostic {
                    item_id: item.id,
                    error,
                });
                continue;
            }
        };

        let days = days_until_expiry(expiry, today);
        if let Some(status) = alert_status(days) {
            list.alerts.push(ExpiryAlert {
                item,
                days_until_expiry: days,
                status,
            });
        }
    }

    list.alerts.sort_by_key(|a| a.days_until_expiry);
    list
}
