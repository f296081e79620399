//! Dashboard domain model.
//!
//! # Responsibility
//! - Define the records held by the dashboard store.
//! - Define partial patches and their merge rules.
//!
//! # Invariants
//! - Every record has a total default; a fresh store is always renderable.
//! - Patches only ever overwrite the fields they carry.

pub mod guestbook;
pub mod metrics;
pub mod notification;
pub mod settings;
