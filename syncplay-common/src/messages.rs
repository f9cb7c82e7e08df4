//! Realtime wire message catalog
//!
//! One central tagged enum per direction, mirroring the channel protocol:
//! every frame is a JSON object whose `type` field names the message.
//! Client frames that fail to deserialize (unknown type, unknown action,
//! wrong value shape) are dropped by the transport layer; that is the
//! protocol's silently-ignored invalid-input policy.

use serde::{Deserialize, Serialize};

use crate::model::{PlaybackState, Track};
use crate::ConnectionId;

/// Control intents carried by `player:control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlAction {
    Play,
    Pause,
    Next,
    Prev,
    Seek,
    SelectSong,
}

/// Client-to-server messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Request a full snapshot resync; answered with `sync:response` to the
    /// requesting connection only.
    #[serde(rename = "sync:request")]
    SyncRequest,

    /// Controller submits a full replacement queue order.
    #[serde(rename = "queue:submit")]
    QueueSubmit { queue: Vec<Track> },

    /// Add a single track to the end of the queue.
    #[serde(rename = "queue:addSong")]
    QueueAddSong { song: Track },

    /// Empty the queue and stop playback.
    #[serde(rename = "queue:clear")]
    QueueClear,

    /// Transport or cursor intent; `value` carries the seek position or the
    /// selected index depending on `action`.
    #[serde(rename = "player:control")]
    PlayerControl {
        action: ControlAction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    },

    /// Periodic playhead report from the actively playing client.
    #[serde(rename = "player:timeUpdate")]
    PlayerTimeUpdate {
        #[serde(rename = "currentTime")]
        current_time: f64,
        duration: f64,
    },

    /// The active client finished the current track.
    #[serde(rename = "player:songEnded")]
    PlayerSongEnded,
}

/// Server-to-client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Full snapshot, the sole recovery mechanism.
    #[serde(rename = "sync:response")]
    SyncResponse {
        #[serde(flatten)]
        state: PlaybackState,
    },

    /// Canonical queue replacement.
    #[serde(rename = "queue:update")]
    QueueUpdate { queue: Vec<Track> },

    /// The cursor moved to a new track.
    #[serde(rename = "song:change")]
    SongChange {
        index: usize,
        song: Option<Track>,
        #[serde(
            rename = "isPlaying",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        is_playing: Option<bool>,
    },

    /// Partial transport-state update; absent fields are unchanged.
    #[serde(rename = "player:state")]
    PlayerState {
        #[serde(
            rename = "isPlaying",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        is_playing: Option<bool>,
        #[serde(
            rename = "currentTime",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        current_time: Option<f64>,
        #[serde(
            rename = "currentIndex",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        current_index: Option<usize>,
    },

    /// Intent rejected; sent to the originating connection only.
    #[serde(rename = "queue:error")]
    QueueError { message: String },
}

impl ServerMessage {
    /// Wire name of this message, for logging.
    pub fn message_type(&self) -> &'static str {
        match self {
            ServerMessage::SyncResponse { .. } => "sync:response",
            ServerMessage::QueueUpdate { .. } => "queue:update",
            ServerMessage::SongChange { .. } => "song:change",
            ServerMessage::PlayerState { .. } => "player:state",
            ServerMessage::QueueError { .. } => "queue:error",
        }
    }
}

/// Which connections receive a published message.
///
/// The recipient set is an explicit parameter of every publish so the
/// broadcast policy lives in one place instead of being an implicit
/// property of each handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    /// Every connection, the originator included.
    All,
    /// Every connection except the named one (telemetry echo suppression).
    AllExcept(ConnectionId),
    /// Exactly one connection (snapshots, rejections).
    Only(ConnectionId),
}

impl Recipients {
    /// Whether `id` is in this recipient set.
    pub fn includes(&self, id: ConnectionId) -> bool {
        match self {
            Recipients::All => true,
            Recipients::AllExcept(excluded) => *excluded != id,
            Recipients::Only(only) => *only == id,
        }
    }
}
