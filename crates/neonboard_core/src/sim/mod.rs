//! Periodic simulation drivers.
//!
//! # Responsibility
//! - Fake live traffic by nudging site metrics on a fixed interval.
//! - Occasionally enqueue an order notification.
//!
//! # Invariants
//! - Every tick reads the store value current at tick time.
//! - A stopped driver never writes to the store again.

mod simulation_driver;

pub use simulation_driver::{
    stats_delta, SimulationDriver, TickReport, ORDER_NOTIFICATION_MESSAGE,
};
