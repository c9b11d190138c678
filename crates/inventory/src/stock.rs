//! Low-stock detection.

use cookgenie_core::{DomainError, DomainResult};

use crate::item::InventoryItem;

/// Threshold used when the caller does not supply one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 1.0;

/// Items whose quantity is at or below `threshold`, in input order.
///
/// The threshold is compared against the raw quantity regardless of unit.
pub fn low_stock<'a, I>(items: I, threshold: f64) -> DomainResult<Vec<&'a InventoryItem>>
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(DomainError::validation(
            "threshold must be a non-negative number",
        ));
    }

    Ok(items
        .into_iter()
        .filter(|item| item.quantity <= threshold)
        .collect())
}
