//! SyncPlay server library
//!
//! Canonical "now playing" state shared across a display and any number of
//! mobile controllers. The store owns the state, the hub owns the store and
//! the fan-out set, and the API layer owns the transports.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hub;
pub mod store;

pub use error::{Error, Result};
