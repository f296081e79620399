//! Dashboard state store.
//!
//! # Responsibility
//! - Hold cross-page UI state in one explicitly constructed container.
//! - Expose named update operations that merge partial patches.
//! - Notify subscribed views after every committed mutation.
//!
//! # Invariants
//! - Fields are only written through the store's update operations.
//! - Listeners observe fully merged state, never a partial merge.
//! - The notification queue is bounded; overflow evicts the oldest entry.

mod dashboard_store;
mod subscription;

pub use dashboard_store::{DashboardState, DashboardStore, StoreChange, StoreResult};
pub use subscription::SubscriptionId;
