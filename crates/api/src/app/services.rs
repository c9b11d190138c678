//! Service wiring: stores + clock, and the use cases the routes call.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};

use cookgenie_core::{
    Clock, DomainError, DomainResult, InventoryItemId, ProfileId, SystemClock,
};
use cookgenie_infra::{InMemoryProfileStore, ProfileStore};
use cookgenie_inventory::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use cookgenie_profiles::{
    NewPreferences, NewProfile, PreferencesPatch, Profile, ProfilePatch, UserPreferences,
};

use crate::config::ApiConfig;

/// Shared state handed to every handler.
pub struct AppServices {
    profiles: Arc<dyn ProfileStore<Profile>>,
    preferences: Arc<dyn ProfileStore<UserPreferences>>,
    items: Arc<dyn ProfileStore<InventoryItem>>,
    clock: Arc<dyn Clock>,
}

impl AppServices {
    pub fn new(
        profiles: Arc<dyn ProfileStore<Profile>>,
        preferences: Arc<dyn ProfileStore<UserPreferences>>,
        items: Arc<dyn ProfileStore<InventoryItem>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            preferences,
            items,
            clock,
        }
    }

    /// In-memory stores and a wall clock in the configured reference timezone.
    pub fn in_memory(config: &ApiConfig) -> Self {
        Self::new(
            Arc::new(InMemoryProfileStore::<Profile>::new()),
            Arc::new(InMemoryProfileStore::<UserPreferences>::new()),
            Arc::new(InMemoryProfileStore::<InventoryItem>::new()),
            Arc::new(SystemClock::with_offset(config.utc_offset)),
        )
    }

    /// Today's date in the reference timezone.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Reference timezone for reading stored expiry timestamps.
    pub fn reference_offset(&self) -> FixedOffset {
        self.clock.offset()
    }

    // -------------------------
    // Profiles
    // -------------------------

    pub fn create_profile(&self, new: NewProfile) -> DomainResult<Profile> {
        new.validate()?;
        if let Some(email) = new.email() {
            self.ensure_email_free(email, None)?;
        }

        let profile = Profile::create(ProfileId::new(), new, self.clock.now())?;
        self.profiles.upsert(profile.clone());
        tracing::info!(profile_id = %profile.id, "profile created");
        Ok(profile)
    }

    pub fn list_profiles(&self) -> Vec<Profile> {
        self.profiles.all()
    }

    pub fn get_profile(&self, id: ProfileId) -> DomainResult<Profile> {
        self.profiles
            .find(&id)
            .ok_or_else(|| DomainError::not_found("profile"))
    }

    pub fn update_profile(&self, id: ProfileId, patch: ProfilePatch) -> DomainResult<Profile> {
        let mut profile = self.get_profile(id)?;
        if let Some(email) = patch.email() {
            self.ensure_email_free(email, Some(id))?;
        }

        profile.apply_patch(patch, self.clock.now())?;
        self.profiles.upsert(profile.clone());
        tracing::info!(profile_id = %id, "profile updated");
        Ok(profile)
    }

    /// Delete a profile together with its inventory and preferences.
    pub fn delete_profile(&self, id: ProfileId) -> DomainResult<()> {
        self.profiles
            .remove(id, &id)
            .ok_or_else(|| DomainError::not_found("profile"))?;

        let items = self.items.list(id);
        for item in &items {
            self.items.remove(id, &item.id);
        }
        let had_preferences = self.preferences.remove(id, &id).is_some();

        tracing::info!(
            profile_id = %id,
            items_removed = items.len(),
            had_preferences,
            "profile deleted"
        );
        Ok(())
    }

    fn ensure_profile(&self, id: ProfileId) -> DomainResult<()> {
        self.get_profile(id).map(|_| ())
    }

    fn ensure_email_free(&self, email: &str, except: Option<ProfileId>) -> DomainResult<()> {
        let taken = self
            .profiles
            .all()
            .iter()
            .any(|p| Some(p.id) != except && p.has_email(email));
        if taken {
            return Err(DomainError::conflict("email already registered"));
        }
        Ok(())
    }

    // -------------------------
    // Preferences
    // -------------------------

    pub fn create_preferences(&self, new: NewPreferences) -> DomainResult<UserPreferences> {
        self.ensure_profile(new.profile_id)?;
        if self.preferences.find(&new.profile_id).is_some() {
            return Err(DomainError::conflict(
                "preferences already exist for this profile; use PUT to update",
            ));
        }

        let prefs = UserPreferences::create(new, self.clock.now())?;
        self.preferences.upsert(prefs.clone());
        tracing::info!(profile_id = %prefs.profile_id, "preferences created");
        Ok(prefs)
    }

    pub fn get_preferences(&self, profile_id: ProfileId) -> DomainResult<UserPreferences> {
        self.preferences
            .get(profile_id, &profile_id)
            .ok_or_else(|| DomainError::not_found("preferences"))
    }

    pub fn update_preferences(
        &self,
        profile_id: ProfileId,
        patch: PreferencesPatch,
    ) -> DomainResult<UserPreferences> {
        let mut prefs = self.get_preferences(profile_id)?;
        prefs.apply_patch(patch, self.clock.now())?;
        self.preferences.upsert(prefs.clone());
        tracing::info!(profile_id = %profile_id, "preferences updated");
        Ok(prefs)
    }

    pub fn delete_preferences(&self, profile_id: ProfileId) -> DomainResult<()> {
        self.preferences
            .remove(profile_id, &profile_id)
            .ok_or_else(|| DomainError::not_found("preferences"))?;
        tracing::info!(profile_id = %profile_id, "preferences deleted");
        Ok(())
    }

    // -------------------------
    // Inventory
    // -------------------------

    pub fn create_item(&self, new: NewInventoryItem) -> DomainResult<InventoryItem> {
        self.ensure_profile(new.profile_id)?;

        let item = InventoryItem::create(InventoryItemId::new(), new, self.clock.now())?;
        self.items.upsert(item.clone());
        tracing::info!(item_id = %item.id, profile_id = %item.profile_id, "inventory item created");
        Ok(item)
    }

    pub fn list_items(&self, profile_id: ProfileId) -> Vec<InventoryItem> {
        self.items.list(profile_id)
    }

    pub fn get_item(&self, id: InventoryItemId) -> DomainResult<InventoryItem> {
        self.items
            .find(&id)
            .ok_or_else(|| DomainError::not_found("inventory item"))
    }

    pub fn update_item(
        &self,
        id: InventoryItemId,
        patch: InventoryItemPatch,
    ) -> DomainResult<InventoryItem> {
        let mut item = self.get_item(id)?;
        item.apply_patch(patch, self.clock.now())?;
        self.items.upsert(item.clone());
        tracing::info!(item_id = %item.id, "inventory item updated");
        Ok(item)
    }

    pub fn delete_item(&self, id: InventoryItemId) -> DomainResult<()> {
        let item = self.get_item(id)?;
        self.items
            .remove(item.profile_id, &id)
            .ok_or_else(|| DomainError::not_found("inventory item"))?;
        tracing::info!(item_id = %id, profile_id = %item.profile_id, "inventory item deleted");
        Ok(())
    }
}
