//! todo-api library entry.
//!
//! Wires the todo store, the metrics collector, and the HTTP layer into a
//! single service. Consumed by the binary (`main.rs`) and by the
//! integration tests.

pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod router;
pub mod state;
