//! Dashboard store implementation.

use crate::config::{DashboardConfig, SettingsPolicy, DEFAULT_NOTIFICATION_CAPACITY};
use crate::model::metrics::{GuestbookStats, GuestbookStatsPatch, SiteStats, SiteStatsPatch};
use crate::model::notification::{NewNotification, Notification, NotificationId};
use crate::model::settings::{FluidSettingsPatch, SettingsError, UiSettings, UiSettingsPatch};
use crate::store::subscription::{ListenerSet, SubscriptionId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub type StoreResult<T> = Result<T, SettingsError>;

/// Readable store contents. Also the serialized snapshot shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub is_dark_mode: bool,
    pub ui_settings: UiSettings,
    pub is_animating: bool,
    pub stats: SiteStats,
    pub guestbook_stats: GuestbookStats,
    pub sidebar_open: bool,
    /// Oldest first.
    pub notifications: VecDeque<Notification>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            is_dark_mode: true,
            ui_settings: UiSettings::default(),
            is_animating: false,
            stats: SiteStats::default(),
            guestbook_stats: GuestbookStats::default(),
            sidebar_open: true,
            notifications: VecDeque::new(),
        }
    }
}

/// What a committed mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Theme,
    UiSettings,
    FluidSettings,
    Animating,
    Stats,
    GuestbookStats,
    Sidebar,
    NotificationAdded(NotificationId),
    NotificationRemoved(NotificationId),
    NotificationEvicted(NotificationId),
}

/// Single source of truth for cross-page UI state.
///
/// Constructed explicitly and handed to whichever views need it; there is
/// no process-wide instance.
pub struct DashboardStore {
    state: DashboardState,
    policy: SettingsPolicy,
    notification_capacity: usize,
    listeners: ListenerSet,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Creates a store with built-in defaults and the permissive policy.
    pub fn new() -> Self {
        Self {
            state: DashboardState::default(),
            policy: SettingsPolicy::Permissive,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            listeners: ListenerSet::default(),
        }
    }

    /// Creates a store honouring the policy and queue bound in `config`.
    pub fn with_config(config: &DashboardConfig) -> Self {
        Self {
            policy: config.settings_policy,
            notification_capacity: config.notification_capacity.max(1),
            ..Self::new()
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.clone()
    }

    pub fn policy(&self) -> SettingsPolicy {
        self.policy
    }

    pub fn notification_capacity(&self) -> usize {
        self.notification_capacity
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.is_dark_mode
    }

    pub fn ui_settings(&self) -> &UiSettings {
        &self.state.ui_settings
    }

    pub fn stats(&self) -> &SiteStats {
        &self.state.stats
    }

    pub fn guestbook_stats(&self) -> &GuestbookStats {
        &self.state.guestbook_stats
    }

    pub fn sidebar_open(&self) -> bool {
        self.state.sidebar_open
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.state.notifications.iter()
    }

    pub fn notification_count(&self) -> usize {
        self.state.notifications.len()
    }

    /// Registers a view callback invoked after every committed mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreChange, &DashboardState) + 'static,
    ) -> SubscriptionId {
        self.listeners.insert(Box::new(listener))
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.state.is_dark_mode = !self.state.is_dark_mode;
        debug!(
            "event=store_update module=store op=toggle_theme is_dark_mode={}",
            self.state.is_dark_mode
        );
        self.emit(StoreChange::Theme);
        self.state.is_dark_mode
    }

    /// Merges a partial settings patch, including a nested fluid patch.
    /// An empty patch changes nothing and notifies no one.
    ///
    /// # Errors
    /// - Under `SettingsPolicy::Strict`, returns `SettingsError` when the
    ///   merged result leaves a slider range; state is left untouched.
    pub fn update_ui_settings(&mut self, patch: &UiSettingsPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut merged = self.state.ui_settings.clone();
        merged.apply(patch);
        self.commit_settings(merged, "update_ui_settings")?;
        self.emit(StoreChange::UiSettings);
        Ok(())
    }

    /// Merges into the nested fluid block only.
    ///
    /// # Errors
    /// - Same policy rules as `update_ui_settings`.
    pub fn update_fluid_settings(&mut self, patch: &FluidSettingsPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut merged = self.state.ui_settings.clone();
        merged.fluid_settings.apply(patch);
        self.commit_settings(merged, "update_fluid_settings")?;
        self.emit(StoreChange::FluidSettings);
        Ok(())
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.state.is_animating = animating;
        self.emit(StoreChange::Animating);
    }

    /// Merges site metrics; values are never clamped.
    pub fn update_stats(&mut self, patch: &SiteStatsPatch) {
        self.state.stats.apply(patch);
        debug!("event=store_update module=store op=update_stats status=ok");
        self.emit(StoreChange::Stats);
    }

    /// Merges guestbook metrics; values are never clamped.
    pub fn update_guestbook_stats(&mut self, patch: &GuestbookStatsPatch) {
        self.state.guestbook_stats.apply(patch);
        debug!("event=store_update module=store op=update_guestbook_stats status=ok");
        self.emit(StoreChange::GuestbookStats);
    }

    /// Flips sidebar visibility and returns the new value.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.state.sidebar_open = !self.state.sidebar_open;
        self.emit(StoreChange::Sidebar);
        self.state.sidebar_open
    }

    /// Appends a notification stamped with `now_ms` and returns its id.
    ///
    /// When the queue is full the oldest entry is evicted first.
    pub fn add_notification(&mut self, new: NewNotification, now_ms: u64) -> NotificationId {
        while self.state.notifications.len() >= self.notification_capacity {
            let Some(evicted) = self.state.notifications.pop_front() else {
                break;
            };
            info!(
                "event=notification_evicted module=store id={} capacity={}",
                evicted.id, self.notification_capacity
            );
            self.emit(StoreChange::NotificationEvicted(evicted.id));
        }

        let notification = Notification::from_new(new, now_ms);
        let id = notification.id;
        debug!(
            "event=store_update module=store op=add_notification id={} kind={:?}",
            id, notification.kind
        );
        self.state.notifications.push_back(notification);
        self.emit(StoreChange::NotificationAdded(id));
        id
    }

    /// Removes the entry with `id`. Absent ids are a no-op returning `false`.
    pub fn remove_notification(&mut self, id: NotificationId) -> bool {
        let Some(index) = self
            .state
            .notifications
            .iter()
            .position(|notification| notification.id == id)
        else {
            return false;
        };
        self.state.notifications.remove(index);
        self.emit(StoreChange::NotificationRemoved(id));
        true
    }

    fn commit_settings(&mut self, merged: UiSettings, op: &'static str) -> StoreResult<()> {
        if self.policy == SettingsPolicy::Strict {
            if let Err(err) = merged.validate() {
                info!("event=store_update module=store op={op} status=rejected reason=\"{err}\"");
                return Err(err);
            }
        }
        self.state.ui_settings = merged;
        debug!("event=store_update module=store op={op} status=ok");
        Ok(())
    }

    fn emit(&mut self, change: StoreChange) {
        self.listeners.notify(&change, &self.state);
    }
}
