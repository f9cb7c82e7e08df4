//! SyncHub: the serialized command dispatcher
//!
//! The hub is the only writer to the playback store. All mutation paths
//! (realtime messages, connection lifecycle, REST snapshot queries) funnel
//! through one mpsc channel into one task, and each command is fully
//! processed (store mutation plus broadcasts) before the next is picked up.
//! That run-to-completion discipline is the system's entire concurrency
//! control: there are no locks because nothing can interleave.

mod registry;

pub use registry::ConnectionRegistry;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use syncplay_common::{
    ClientMessage, ConnectionId, ControlAction, PlaybackState, Recipients, ServerMessage, Track,
    MAX_QUEUE_SIZE,
};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::store::{Direction, PlaybackStore};

/// Commands carried on the hub's single serialized channel.
#[derive(Debug)]
pub enum HubCommand {
    /// A new connection came up; it immediately receives a snapshot.
    Connect {
        id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerMessage>,
    },
    /// A connection went away. Never mutates playback state.
    Disconnect { id: ConnectionId },
    /// An inbound realtime message from a connected client.
    Inbound {
        id: ConnectionId,
        message: ClientMessage,
    },
    /// Snapshot query from the REST layer, served through the same
    /// serialized path as every mutation.
    Snapshot {
        reply: oneshot::Sender<PlaybackState>,
    },
}

/// Cloneable handle for submitting commands to the hub task.
#[derive(Clone)]
pub struct HubHandle {
    tx: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    pub fn connect(
        &self,
        id: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<()> {
        self.send(HubCommand::Connect { id, outbound })
    }

    pub fn disconnect(&self, id: ConnectionId) -> Result<()> {
        self.send(HubCommand::Disconnect { id })
    }

    pub fn inbound(&self, id: ConnectionId, message: ClientMessage) -> Result<()> {
        self.send(HubCommand::Inbound { id, message })
    }

    /// Current state snapshot, answered by the hub task in arrival order.
    pub async fn snapshot(&self) -> Result<PlaybackState> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Snapshot { reply })?;
        rx.await
            .map_err(|_| Error::Hub("hub task dropped snapshot reply".to_string()))
    }

    fn send(&self, command: HubCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| Error::Hub("hub task has shut down".to_string()))
    }
}

/// Owns the playback store and the connection registry; translates inbound
/// intents into store operations and decides what to broadcast to whom.
pub struct SyncHub {
    store: PlaybackStore,
    catalog: Arc<Catalog>,
    connections: ConnectionRegistry,
}

impl SyncHub {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            store: PlaybackStore::new(),
            catalog,
            connections: ConnectionRegistry::new(),
        }
    }

    /// Spawn the hub task and return a handle for submitting commands.
    pub fn spawn(catalog: Arc<Catalog>) -> HubHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = SyncHub::new(catalog);
        tokio::spawn(hub.run(rx));
        HubHandle { tx }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<HubCommand>) {
        info!("Sync hub started");
        while let Some(command) = rx.recv().await {
            self.apply(command);
        }
        info!("Sync hub stopped");
    }

    /// Process one command to completion: store mutation, then broadcasts.
    ///
    /// Public so tests can drive the hub synchronously without sockets.
    pub fn apply(&mut self, command: HubCommand) {
        match command {
            HubCommand::Connect { id, outbound } => {
                self.connections.insert(id, outbound);
                info!(
                    "Client connected: {} ({} total)",
                    id,
                    self.connections.len()
                );
                self.publish(
                    Recipients::Only(id),
                    ServerMessage::SyncResponse {
                        state: self.store.snapshot(),
                    },
                );
            }
            HubCommand::Disconnect { id } => {
                self.connections.remove(id);
                info!(
                    "Client disconnected: {} ({} total)",
                    id,
                    self.connections.len()
                );
            }
            HubCommand::Inbound { id, message } => self.handle_message(id, message),
            HubCommand::Snapshot { reply } => {
                let _ = reply.send(self.store.snapshot());
            }
        }
    }

    /// Number of live connections (diagnostics).
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn handle_message(&mut self, sender: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::SyncRequest => {
                self.publish(
                    Recipients::Only(sender),
                    ServerMessage::SyncResponse {
                        state: self.store.snapshot(),
                    },
                );
            }

            ClientMessage::QueueSubmit { queue } => {
                let resolved = self.resolve_tracks(queue);
                debug!("Queue submitted: {} track(s)", resolved.len());

                self.store.replace_queue(resolved);
                // A submitted queue always restarts from its first track
                self.store.select_index(0);
                self.store.set_playing(true);

                self.broadcast_queue();
                if let Some(song) = self.store.state().current_track().cloned() {
                    self.publish(
                        Recipients::All,
                        ServerMessage::SongChange {
                            index: 0,
                            song: Some(song),
                            is_playing: None,
                        },
                    );
                }
                self.broadcast_transport(Recipients::All);
            }

            ClientMessage::QueueAddSong { song } => {
                // Resolve against the catalog so clients cannot inject
                // forged metadata; unknown ids are invalid input
                let Some(track) = self.catalog.get(&song.id).cloned() else {
                    debug!("Ignoring add of unknown track id {:?}", song.id);
                    return;
                };

                let result = self.store.append_track(track.clone());
                if !result.added {
                    self.publish(
                        Recipients::Only(sender),
                        ServerMessage::QueueError {
                            message: format!("Queue is full (max {} songs)", MAX_QUEUE_SIZE),
                        },
                    );
                    return;
                }

                self.broadcast_queue();
                if result.was_first {
                    // First track in an empty jukebox auto-starts playback
                    self.store.set_playing(true);
                    self.publish(
                        Recipients::All,
                        ServerMessage::SongChange {
                            index: 0,
                            song: Some(track),
                            is_playing: None,
                        },
                    );
                    self.broadcast_transport(Recipients::All);
                }
            }

            ClientMessage::QueueClear => {
                self.store.clear();
                self.broadcast_queue();
                self.broadcast_transport(Recipients::All);
            }

            ClientMessage::PlayerControl { action, value } => {
                self.handle_control(action, value);
            }

            ClientMessage::PlayerTimeUpdate {
                current_time,
                duration,
            } => {
                self.store.apply_heartbeat(current_time, duration);
                // Senders never hear their own telemetry echoed back
                self.broadcast_transport(Recipients::AllExcept(sender));
            }

            ClientMessage::PlayerSongEnded => {
                let advanced = self.store.advance(Direction::Next);
                if advanced.has_next {
                    // Keep playing across the track boundary
                    self.store.set_playing(true);
                    let state = self.store.state();
                    let message = ServerMessage::SongChange {
                        index: state.current_index,
                        song: state.current_track().cloned(),
                        is_playing: Some(true),
                    };
                    self.publish(Recipients::All, message);
                    self.broadcast_transport(Recipients::All);
                } else {
                    // End of queue is terminal, not an error
                    self.publish(
                        Recipients::All,
                        ServerMessage::PlayerState {
                            is_playing: Some(false),
                            current_time: None,
                            current_index: None,
                        },
                    );
                }
            }
        }
    }

    fn handle_control(&mut self, action: ControlAction, value: Option<f64>) {
        debug!("Player control: {:?}", action);
        match action {
            ControlAction::Play => {
                self.store.set_playing(true);
                self.broadcast_transport(Recipients::All);
            }
            ControlAction::Pause => {
                self.store.set_playing(false);
                self.broadcast_transport(Recipients::All);
            }
            ControlAction::Next => {
                let advanced = self.store.advance(Direction::Next);
                if advanced.moved {
                    self.broadcast_song_change();
                }
                self.broadcast_transport(Recipients::All);
            }
            ControlAction::Prev => {
                let advanced = self.store.advance(Direction::Prev);
                if advanced.moved {
                    self.broadcast_song_change();
                }
                self.broadcast_transport(Recipients::All);
            }
            ControlAction::Seek => {
                let Some(position) = value.filter(|v| v.is_finite()) else {
                    return;
                };
                self.store.set_time(position);
                self.broadcast_transport(Recipients::All);
            }
            ControlAction::SelectSong => {
                let Some(index) = value
                    .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
                    .map(|v| v as usize)
                else {
                    return;
                };
                match self.store.select_index(index) {
                    None => {} // out of range: silent no-op, no broadcast
                    Some(moved) => {
                        if moved {
                            self.broadcast_song_change();
                        }
                        self.broadcast_transport(Recipients::All);
                    }
                }
            }
        }
    }

    /// Submitted tracks are resolved by id to their canonical catalog
    /// entries, preserving submission order; unknown ids are dropped.
    fn resolve_tracks(&self, tracks: Vec<Track>) -> Vec<Track> {
        tracks
            .into_iter()
            .filter_map(|t| self.catalog.get(&t.id).cloned())
            .collect()
    }

    fn broadcast_queue(&mut self) {
        let queue = self.store.state().queue.clone();
        self.publish(Recipients::All, ServerMessage::QueueUpdate { queue });
    }

    fn broadcast_song_change(&mut self) {
        let state = self.store.state();
        let message = ServerMessage::SongChange {
            index: state.current_index,
            song: state.current_track().cloned(),
            is_playing: None,
        };
        self.publish(Recipients::All, message);
    }

    fn broadcast_transport(&mut self, recipients: Recipients) {
        let state = self.store.state();
        let message = ServerMessage::PlayerState {
            is_playing: Some(state.is_playing),
            current_time: Some(state.current_time),
            current_index: Some(state.current_index),
        };
        self.publish(recipients, message);
    }

    fn publish(&mut self, recipients: Recipients, message: ServerMessage) {
        self.connections.publish(recipients, &message);
    }
}
