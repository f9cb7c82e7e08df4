//! # SyncPlay Common Library
//!
//! Shared contracts for the SyncPlay server and its clients:
//! - Data model (`Track`, `PlaybackState`)
//! - Realtime wire message catalog (`ClientMessage`, `ServerMessage`)
//! - Broadcast recipient selection (`Recipients`)

pub mod messages;
pub mod model;

pub use messages::{ClientMessage, ControlAction, Recipients, ServerMessage};
pub use model::{PlaybackState, Track, MAX_QUEUE_SIZE};

/// Ephemeral identifier for a connected realtime client.
///
/// Minted at WebSocket upgrade, forgotten at disconnect. Carries no
/// identity beyond the lifetime of the transport link.
pub type ConnectionId = uuid::Uuid;
