//! Household profiles and their cooking preferences.
//!
//! A profile owns an inventory and at most one preference set. Validation and
//! update rules only; storage and uniqueness checks across profiles live with
//! the caller.

pub mod preference;
pub mod profile;

pub use preference::{NewPreferences, PreferencesPatch, SkillLevel, UserPreferences};
pub use profile::{NewProfile, Profile, ProfilePatch};
