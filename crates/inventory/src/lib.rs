//! Kitchen inventory domain.
//!
//! Item records, payload validation, and the expiry rules that drive the
//! inventory badges and the dashboard alert list. Deterministic logic only:
//! every function that depends on the date takes "today" as an argument.

pub mod alerts;
pub mod expiry;
pub mod item;
pub mod stock;
pub mod unit;

pub use alerts::{AlertList, ExpiryAlert, ExpiryDiagnostic, build_alert_list};
pub use expiry::{
    AlertStatus, ExpiryAssessment, ExpiryStatus, InvalidDateError, Severity, alert_status,
    assess, classify, days_until_expiry, parse_expiry_date, severity, status_text,
};
pub use item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
pub use stock::{DEFAULT_LOW_STOCK_THRESHOLD, low_stock};
pub use unit::Unit;
