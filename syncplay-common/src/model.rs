//! Shared data model
//!
//! `Track` and `PlaybackState` are serialized both over the realtime channel
//! and from the REST bootstrap endpoints, so field names follow the wire
//! convention (camelCase).

use serde::{Deserialize, Serialize};

/// Maximum number of tracks the queue will hold.
///
/// A full-queue replacement is truncated to this bound; an incremental
/// append beyond it is refused outright.
pub const MAX_QUEUE_SIZE: usize = 50;

/// A single catalog track. Immutable; sourced from the catalog at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque identifier, unique within the catalog
    pub id: String,
    /// Display title
    pub title: String,
    /// Display artist
    pub artist: String,
    /// Relative URL of the audio asset
    pub file: String,
}

/// The single canonical playback aggregate.
///
/// Invariants (maintained by the store, never by callers):
/// - `current_index < queue.len()` whenever the queue is non-empty
/// - empty queue implies `current_index == 0` and `is_playing == false`
/// - `queue.len() <= MAX_QUEUE_SIZE`
/// - `current_time` and `duration` are non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Ordered play queue, insertion order significant
    pub queue: Vec<Track>,
    /// Cursor into `queue`
    pub current_index: usize,
    /// Transport flag
    pub is_playing: bool,
    /// Last reported playhead position in seconds (advisory telemetry)
    pub current_time: f64,
    /// Last reported track length in seconds (advisory telemetry)
    pub duration: f64,
}

impl PlaybackState {
    /// Empty state: no queue, stopped, zeroed clock.
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current_index: 0,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
        }
    }

    /// The track under the cursor, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.get(self.current_index)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
