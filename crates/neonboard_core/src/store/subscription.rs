//! Listener registry for store change fan-out.

use crate::store::dashboard_store::{DashboardState, StoreChange};
use std::collections::BTreeMap;

/// Handle returned by `DashboardStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub(crate) type Listener = Box<dyn FnMut(&StoreChange, &DashboardState)>;

/// Listeners keyed by subscription order so fan-out is deterministic.
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Listener>,
}

impl ListenerSet {
    pub(crate) fn insert(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(&mut self, change: &StoreChange, state: &DashboardState) {
        for listener in self.listeners.values_mut() {
            listener(change, state);
        }
    }
}
